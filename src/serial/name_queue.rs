//! Lock-free byte queue for name entry
//!
//! SPSC: the serial RX interrupt pushes raw bytes while the game is in
//! ENTER_NAME, the game task pops them on its next poll.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Queue size. Must be a power of 2.
pub const NAME_QUEUE_SIZE: usize = 32;

/// Byte ring with static size.
pub struct NameQueue<const N: usize = NAME_QUEUE_SIZE> {
    buffer: UnsafeCell<[u8; N]>,
    head: AtomicU32,
    tail: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: One producer (RX interrupt), one consumer (game task). A slot is
// only written before `head` publishes it and only read before `tail`
// releases it.
unsafe impl<const N: usize> Sync for NameQueue<N> {}
unsafe impl<const N: usize> Send for NameQueue<N> {}

impl<const N: usize> NameQueue<N> {
    pub const fn new() -> Self {
        const { assert!(N.is_power_of_two(), "Queue size must be power of 2") };

        Self {
            buffer: UnsafeCell::new([0u8; N]),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a byte. A full queue keeps what it holds and drops `byte`.
    pub fn push(&self, byte: u8) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);

        if head.wrapping_sub(tail) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: single producer, slot not yet visible to the consumer.
        unsafe {
            (*self.buffer.get())[head as usize % N] = byte;
        }
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest byte.
    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if head == tail {
            return None;
        }

        // SAFETY: single consumer, slot published by the Acquire load above.
        let byte = unsafe { (*self.buffer.get())[tail as usize % N] };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(byte)
    }

    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Relaxed);
        head.wrapping_sub(tail) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard everything queued (consumer side).
    pub fn clear(&self) {
        let head = self.head.load(Ordering::Acquire);
        self.tail.store(head, Ordering::Release);
    }

    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for NameQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

//! Interrupt-safe logging.
//!
//! ```text
//! serial RX ──simon_warn!()──▶ isr_log  ─┐
//!                                        ├──▶ log_drain (main loop) ──▶ console
//! game task ──simon_debug!()─▶ task_log ─┘
//! ```
//!
//! Each stream is a fixed ring with exactly one producer context (see
//! `shared::Shared`). Producers format straight into the ring slot and never
//! block; when the ring is full the message is lost and counted instead.

use core::cell::UnsafeCell;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// Longest message kept; longer ones are cut.
pub const MAX_MSG_LEN: usize = 64;

/// Entries per stream.
pub const LOG_BUFFER_SIZE: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Clock reading when the message was recorded.
    pub at_ms: u32,
    pub level: LogLevel,
    pub len: u8,
    text_buf: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        at_ms: 0,
        level: LogLevel::Info,
        len: 0,
        text_buf: [0; MAX_MSG_LEN],
    };

    /// Message text. A cut that splits a UTF-8 sequence is trimmed back to
    /// the last whole character.
    pub fn text(&self) -> &str {
        let bytes = &self.text_buf[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Truncating `fmt::Write` over one ring slot.
struct SlotWriter<'a> {
    slot: &'a mut LogEntry,
}

impl fmt::Write for SlotWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let used = self.slot.len as usize;
        let take = s.len().min(MAX_MSG_LEN - used);
        self.slot.text_buf[used..used + take].copy_from_slice(&s.as_bytes()[..take]);
        self.slot.len = (used + take) as u8;
        Ok(())
    }
}

/// Single-producer single-consumer ring of log entries.
///
/// `head` counts entries ever published, `tail` entries ever drained. A slot
/// belongs to the producer until the Release store of `head` hands it over,
/// so the drain never sees a half-written message even when the producer is
/// an interrupt that preempted it.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: UnsafeCell<[LogEntry; N]>,
    head: AtomicU32,
    tail: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: one producer and one consumer per stream; slot ownership moves
// with the Release stores of `head` and `tail`.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be a power of two");
        Self {
            slots: UnsafeCell::new([LogEntry::EMPTY; N]),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Claim the next free slot, fill it through `fill`, then publish it.
    /// Producer side only.
    fn publish_with(&self, at_ms: u32, level: LogLevel, fill: impl FnOnce(&mut LogEntry)) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        if head.wrapping_sub(self.tail.load(Ordering::Acquire)) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: only the producer touches the slot at `head`, and the
        // consumer cannot reach it until `head` moves past it.
        let slot = unsafe { &mut (*self.slots.get())[head as usize % N] };
        slot.at_ms = at_ms;
        slot.level = level;
        slot.len = 0;
        fill(slot);

        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Queue a preformatted message. `false` if the ring was full.
    pub fn push(&self, at_ms: u32, level: LogLevel, msg: &[u8]) -> bool {
        self.publish_with(at_ms, level, |slot| {
            let n = msg.len().min(MAX_MSG_LEN);
            slot.text_buf[..n].copy_from_slice(&msg[..n]);
            slot.len = n as u8;
        })
    }

    /// Format `args` directly into the next slot. Used by the log macros.
    pub fn record(&self, level: LogLevel, at_ms: u32, args: fmt::Arguments<'_>) -> bool {
        self.publish_with(at_ms, level, |slot| {
            let _ = fmt::write(&mut SlotWriter { slot }, args);
        })
    }

    /// Oldest unread entry. Consumer side only.
    pub fn drain(&self) -> Option<LogEntry> {
        let tail = self.tail.load(Ordering::Relaxed);
        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: the Acquire load above made this slot visible, and the
        // producer will not reuse it until `tail` moves past it.
        let entry = unsafe { (*self.slots.get())[tail as usize % N] };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Messages lost to a full ring since the last `reset_dropped`.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    pub fn pending(&self) -> u32 {
        self.head
            .load(Ordering::Acquire)
            .wrapping_sub(self.tail.load(Ordering::Relaxed))
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Record a message on a stream without blocking.
///
/// ```ignore
/// simon_log!(LogLevel::Info, shared.task_log, shared.now_ms(), "round {}", n);
/// ```
#[macro_export]
macro_rules! simon_log {
    ($level:expr, $stream:expr, $at_ms:expr, $($arg:tt)*) => {{
        $stream.record($level, $at_ms, format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! simon_error {
    ($stream:expr, $at_ms:expr, $($arg:tt)*) => {
        $crate::simon_log!($crate::logging::LogLevel::Error, $stream, $at_ms, $($arg)*)
    };
}

#[macro_export]
macro_rules! simon_warn {
    ($stream:expr, $at_ms:expr, $($arg:tt)*) => {
        $crate::simon_log!($crate::logging::LogLevel::Warn, $stream, $at_ms, $($arg)*)
    };
}

#[macro_export]
macro_rules! simon_info {
    ($stream:expr, $at_ms:expr, $($arg:tt)*) => {
        $crate::simon_log!($crate::logging::LogLevel::Info, $stream, $at_ms, $($arg)*)
    };
}

#[macro_export]
macro_rules! simon_debug {
    ($stream:expr, $at_ms:expr, $($arg:tt)*) => {
        $crate::simon_log!($crate::logging::LogLevel::Debug, $stream, $at_ms, $($arg)*)
    };
}

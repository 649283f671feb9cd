//! Millisecond clock shared between the tick interrupt and the game task.
//!
//! Two counters:
//! - `ticks`: monotonic milliseconds since boot, never reset
//! - `elapsed`: round-local stopwatch, zeroed only by `reset_elapsed()`
//!
//! Both are single atomics, so the game task reads them untorn without
//! masking interrupts.

use core::sync::atomic::{AtomicU16, AtomicU32, Ordering};

pub struct Clock {
    ticks: AtomicU32,
    elapsed: AtomicU16,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            elapsed: AtomicU16::new(0),
        }
    }

    /// Tick interrupt handler body. Call once per millisecond.
    #[inline]
    pub fn on_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        // Saturate instead of wrapping: a stopwatch left running in
        // AWAITING_INPUT must not come back around to zero.
        let _ = self
            .elapsed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |e| e.checked_add(1));
    }

    /// Advance by `ms` ticks at once (simulator catch-up, tests).
    pub fn advance(&self, ms: u32) {
        for _ in 0..ms {
            self.on_tick();
        }
    }

    /// Milliseconds since boot.
    #[inline]
    pub fn now_ms(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Milliseconds since the last `reset_elapsed()`.
    #[inline]
    pub fn elapsed_ms(&self) -> u16 {
        self.elapsed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_elapsed(&self) {
        self.elapsed.store(0, Ordering::Relaxed);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_and_elapsed_advance_together() {
        let clock = Clock::new();
        clock.advance(25);
        assert_eq!(clock.now_ms(), 25);
        assert_eq!(clock.elapsed_ms(), 25);
    }

    #[test]
    fn test_reset_elapsed_keeps_ticks() {
        let clock = Clock::new();
        clock.advance(100);
        clock.reset_elapsed();
        clock.advance(7);
        assert_eq!(clock.now_ms(), 107);
        assert_eq!(clock.elapsed_ms(), 7);
    }

    #[test]
    fn test_elapsed_saturates() {
        let clock = Clock::new();
        clock.advance(u16::MAX as u32 + 5);
        assert_eq!(clock.elapsed_ms(), u16::MAX);
        assert_eq!(clock.now_ms(), u16::MAX as u32 + 5);
    }
}

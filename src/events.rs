//! Serial-to-game event flags.
//!
//! The serial RX interrupt never calls into the game. It raises flags here
//! and the polled game task consumes them on its next iteration.
//!
//! ```ignore
//! static EVENTS: SerialEvents = SerialEvents::new();
//!
//! // In the RX interrupt:
//! EVENTS.inject_button(Step::Two);
//!
//! // In the game task:
//! if let Some(step) = EVENTS.take_button() {
//!     // treat as a press that has already been released
//! }
//! ```
//!
//! Every payload is a single atomic no wider than 32 bits, so the target's
//! native atomic loads cannot tear it. Payloads that come with a "ready" flag
//! are written before the flag is raised (Release) and read after it is
//! taken (Acquire).

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, AtomicU8, Ordering};

use crate::lfsr::Step;

const NO_BUTTON: u8 = 0;
const NO_OVERRIDE: u16 = u16::MAX;

pub struct SerialEvents {
    /// 0 = none, otherwise step index + 1.
    button: AtomicU8,

    seed: AtomicU32,
    seed_ready: AtomicBool,

    reset: AtomicBool,
    print_scores: AtomicBool,

    /// Knob reading override, `NO_OVERRIDE` when the potentiometer rules.
    delay_override: AtomicU16,

    /// Set by the game while it collects a name; raw bytes bypass the parser.
    diverted: AtomicBool,
}

impl SerialEvents {
    pub const fn new() -> Self {
        Self {
            button: AtomicU8::new(NO_BUTTON),
            seed: AtomicU32::new(0),
            seed_ready: AtomicBool::new(false),
            reset: AtomicBool::new(false),
            print_scores: AtomicBool::new(false),
            delay_override: AtomicU16::new(NO_OVERRIDE),
            diverted: AtomicBool::new(false),
        }
    }

    // --- Producer side (serial interrupt) ---

    /// Latest injected press wins.
    #[inline]
    pub fn inject_button(&self, step: Step) {
        self.button.store(step as u8 + 1, Ordering::Release);
    }

    #[inline]
    pub fn publish_seed(&self, seed: u32) {
        self.seed.store(seed, Ordering::Relaxed);
        self.seed_ready.store(true, Ordering::Release);
    }

    #[inline]
    pub fn request_reset(&self) {
        self.reset.store(true, Ordering::Release);
    }

    #[inline]
    pub fn request_scores(&self) {
        self.print_scores.store(true, Ordering::Release);
    }

    #[inline]
    pub fn set_delay_override(&self, reading: u8) {
        self.delay_override.store(reading as u16, Ordering::Release);
    }

    // --- Consumer side (game task) ---

    #[inline]
    pub fn take_button(&self) -> Option<Step> {
        match self.button.swap(NO_BUTTON, Ordering::Acquire) {
            NO_BUTTON => None,
            n => Some(Step::from_bits(n - 1)),
        }
    }

    #[inline]
    pub fn take_seed(&self) -> Option<u32> {
        if self.seed_ready.swap(false, Ordering::Acquire) {
            Some(self.seed.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    #[inline]
    pub fn take_reset(&self) -> bool {
        self.reset.swap(false, Ordering::Acquire)
    }

    #[inline]
    pub fn take_scores_request(&self) -> bool {
        self.print_scores.swap(false, Ordering::Acquire)
    }

    #[inline]
    pub fn delay_override(&self) -> Option<u8> {
        match self.delay_override.load(Ordering::Acquire) {
            NO_OVERRIDE => None,
            v => Some(v as u8),
        }
    }

    #[inline]
    pub fn clear_delay_override(&self) {
        self.delay_override.store(NO_OVERRIDE, Ordering::Release);
    }

    /// Drop any injected press that has not been consumed yet.
    #[inline]
    pub fn discard_button(&self) {
        self.button.store(NO_BUTTON, Ordering::Release);
    }

    // --- Name-entry diversion (set by the game, read by the interrupt) ---

    #[inline]
    pub fn set_diverted(&self, on: bool) {
        self.diverted.store(on, Ordering::Release);
    }

    #[inline]
    pub fn is_diverted(&self) -> bool {
        self.diverted.load(Ordering::Acquire)
    }
}

impl Default for SerialEvents {
    fn default() -> Self {
        Self::new()
    }
}

//! Module: debounce
//!
//! Purpose: Turn noisy push-button samples into a stable level and
//! press/release edges.
//!
//! Architecture:
//! - `Debouncer`: owned by the 5 ms sampling interrupt. Two-bit vertical
//!   counter per pin, all four pins filtered in parallel with bitwise ops
//! - `DebouncedLevel`: single-byte atomic the interrupt publishes into
//! - `ButtonSnapshot`: owned by the game task. Keeps the previous and
//!   current debounced level and derives edges once per poll, so an edge is
//!   never lost between an interrupt and the poll that should consume it
//!
//! Buttons are active-low (pull-ups): bit set = released, bit clear = pressed.
//! A falling edge is a press, a rising edge is a release.
//!
//! Safety: Safe. No unsafe blocks.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::lfsr::Step;

/// Bits of the sampled port that carry buttons S1..S4.
pub const BUTTON_MASK: u8 = 0x0F;

/// Debounced (or raw) pin levels of the four buttons.
///
/// Bit layout:
/// - Bit 0: S1 (step 0)
/// - Bit 1: S2 (step 1)
/// - Bit 2: S3 (step 2)
/// - Bit 3: S4 (step 3)
/// - Bits 4-7: unused, always reported as 0
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonState(u8);

impl ButtonState {
    /// No buttons held (all pins pulled high).
    pub const RELEASED: Self = Self(BUTTON_MASK);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & BUTTON_MASK)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_pressed(&self, step: Step) -> bool {
        (self.0 & step.mask()) == 0
    }

    pub const fn all_released(&self) -> bool {
        self.0 == BUTTON_MASK
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Vertical-counter debouncer.
///
/// A pin's debounced level toggles only after the raw input has disagreed
/// with it for three samples in a row: the first disagreeing sample arms the
/// counter and two further qualifying samples complete it. Any sample that
/// agrees with the debounced level clears that pin's counter.
pub struct Debouncer {
    count0: u8,
    count1: u8,
    state: u8,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            count0: 0,
            count1: 0,
            state: BUTTON_MASK,
        }
    }

    /// Feed one raw port sample, returns the debounced level.
    #[inline]
    pub fn sample(&mut self, raw: u8) -> ButtonState {
        let changed = (raw ^ self.state) & BUTTON_MASK;

        self.count1 = (self.count1 ^ self.count0) & changed;
        self.count0 = !self.count0 & changed;

        self.state ^= self.count1 & self.count0;
        ButtonState(self.state)
    }

    pub fn level(&self) -> ButtonState {
        ButtonState(self.state)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounced level published from the sampling interrupt.
pub struct DebouncedLevel(AtomicU8);

impl DebouncedLevel {
    pub const fn new() -> Self {
        Self(AtomicU8::new(BUTTON_MASK))
    }

    #[inline]
    pub fn publish(&self, level: ButtonState) {
        self.0.store(level.bits(), Ordering::Release);
    }

    #[inline]
    pub fn load(&self) -> ButtonState {
        ButtonState::from_bits(self.0.load(Ordering::Acquire))
    }
}

impl Default for DebouncedLevel {
    fn default() -> Self {
        Self::new()
    }
}

/// Press/release edges between two consecutive debounced levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    /// Falling edges (bit set = button went down).
    pub pressed: u8,
    /// Rising edges (bit set = button came up).
    pub released: u8,
}

impl Edges {
    /// Pure edge computation.
    pub const fn between(prev: ButtonState, curr: ButtonState) -> Self {
        let changed = prev.0 ^ curr.0;
        Self {
            pressed: changed & prev.0,
            released: changed & curr.0,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }

    /// Lowest-numbered button with a press edge.
    pub fn first_pressed(&self) -> Option<Step> {
        Step::ALL.into_iter().find(|s| self.pressed & s.mask() != 0)
    }

    pub const fn is_released(&self, step: Step) -> bool {
        self.released & step.mask() != 0
    }
}

/// Previous/current snapshot held by the polled consumer.
#[derive(Clone, Copy, Debug)]
pub struct ButtonSnapshot {
    prev: ButtonState,
    curr: ButtonState,
}

impl ButtonSnapshot {
    pub const fn new() -> Self {
        Self {
            prev: ButtonState::RELEASED,
            curr: ButtonState::RELEASED,
        }
    }

    /// Take a new debounced level and return the edges since the last update.
    #[inline]
    pub fn update(&mut self, level: ButtonState) -> Edges {
        self.prev = self.curr;
        self.curr = level;
        Edges::between(self.prev, self.curr)
    }

    pub fn current(&self) -> ButtonState {
        self.curr
    }
}

impl Default for ButtonSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

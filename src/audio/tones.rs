//! Buzzer tone table with console-adjustable octave.
//!
//! The serial interrupt halves or doubles every tone in place, so repeated
//! halvings lose their low bit the way integer division does; the game task
//! reads one step's frequency when it starts a tone. Each tone is its own
//! `AtomicU16`, and the interrupt is the only writer.

use core::sync::atomic::{AtomicI8, AtomicU16, Ordering};

use crate::lfsr::Step;

/// Power-on frequencies, indexed by step.
///
/// E(high), C#, A, E(low).
pub const BASE_FREQUENCIES_HZ: [u16; 4] = [324, 272, 432, 162];

/// Halving is refused once any tone is below this (would drop under 20 Hz).
pub const HALVE_FLOOR_HZ: u16 = 40;

/// Doubling is refused once any tone is above this (would exceed 20 kHz).
pub const DOUBLE_CEILING_HZ: u16 = 10_000;

/// Shared tone table.
pub struct ToneBank {
    frequencies: [AtomicU16; 4],
    /// Net octave changes since the last reset.
    shift: AtomicI8,
}

impl ToneBank {
    pub const fn new() -> Self {
        Self {
            frequencies: [
                AtomicU16::new(BASE_FREQUENCIES_HZ[0]),
                AtomicU16::new(BASE_FREQUENCIES_HZ[1]),
                AtomicU16::new(BASE_FREQUENCIES_HZ[2]),
                AtomicU16::new(BASE_FREQUENCIES_HZ[3]),
            ],
            shift: AtomicI8::new(0),
        }
    }

    /// Net octave shift (0 = base frequencies, negative = lower).
    #[inline]
    pub fn shift(&self) -> i8 {
        self.shift.load(Ordering::Acquire)
    }

    /// Current frequency for `step`.
    #[inline]
    pub fn frequency(&self, step: Step) -> u16 {
        self.frequencies[step.index()].load(Ordering::Acquire)
    }

    fn any(&self, pred: impl Fn(u16) -> bool) -> bool {
        Step::ALL.iter().any(|&s| pred(self.frequency(s)))
    }

    fn rewrite(&self, f: impl Fn(u16) -> u16, octave: i8) {
        for slot in &self.frequencies {
            slot.store(f(slot.load(Ordering::Relaxed)), Ordering::Release);
        }
        self.shift.store(self.shift() + octave, Ordering::Release);
    }

    /// Double every tone. Returns `false` (no change) at the ceiling.
    pub fn double(&self) -> bool {
        if self.any(|f| f > DOUBLE_CEILING_HZ) {
            return false;
        }
        self.rewrite(|f| f << 1, 1);
        true
    }

    /// Halve every tone. Returns `false` (no change) at the floor.
    pub fn halve(&self) -> bool {
        if self.any(|f| f < HALVE_FLOOR_HZ) {
            return false;
        }
        self.rewrite(|f| f >> 1, -1);
        true
    }

    /// Back to the base frequencies.
    pub fn reset(&self) {
        for (slot, base) in self.frequencies.iter().zip(BASE_FREQUENCIES_HZ) {
            slot.store(base, Ordering::Release);
        }
        self.shift.store(0, Ordering::Release);
    }
}

impl Default for ToneBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_frequencies() {
        let bank = ToneBank::new();
        assert_eq!(bank.frequency(Step::One), 324);
        assert_eq!(bank.frequency(Step::Two), 272);
        assert_eq!(bank.frequency(Step::Three), 432);
        assert_eq!(bank.frequency(Step::Four), 162);
    }

    #[test]
    fn test_halving_truncates_in_place() {
        let bank = ToneBank::new();
        bank.halve();
        bank.halve();
        assert_eq!(bank.frequency(Step::Four), 40);
        bank.double();
        assert_eq!(bank.frequency(Step::Four), 80);
        assert_eq!(bank.shift(), -1);
    }
}

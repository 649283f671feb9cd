//! Galois LFSR sequence generator.
//!
//! Pure logic, no hardware dependencies. The played sequence is never stored:
//! step `i` of the current game is recomputed by reseeding from the game seed
//! and clocking the register `i + 1` times. Lookups cost at most
//! `round_length` iterations.
//!
//! The all-zero register is a fixed point (every step is `Step::One`). Seeds
//! arriving over the serial console are checked for zero there; this module
//! accepts any value.

use crate::config::CONFIG;

/// Feedback mask.
pub const LFSR_MASK: u32 = CONFIG.lfsr_mask;

/// One of the four buttons/tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Step {
    /// S1, E(high).
    One = 0,
    /// S2, C#.
    Two = 1,
    /// S3, A.
    Three = 2,
    /// S4, E(low).
    Four = 3,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::One, Step::Two, Step::Three, Step::Four];

    /// Low two bits select the step.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Step::One,
            1 => Step::Two,
            2 => Step::Three,
            _ => Step::Four,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit of this button in a port sample.
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Clock the register once.
///
/// Returns the new register value and the step encoded in its low two bits.
#[inline]
pub const fn next_step(state: u32) -> (u32, Step) {
    let bit = state & 1;
    let mut next = state >> 1;
    if bit == 1 {
        next ^= LFSR_MASK;
    }
    (next, Step::from_bits(next as u8))
}

/// Clock the register `n` times and return the resulting value.
#[inline]
pub const fn advance(state: u32, n: u32) -> u32 {
    let mut s = state;
    let mut i = 0;
    while i < n {
        s = next_step(s).0;
        i += 1;
    }
    s
}

/// Seed bookkeeping for one game.
///
/// `game_seed` marks the start of the current attempt and only moves on
/// failure. `base_seed` is where a console reset returns to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    game_seed: u32,
    base_seed: u32,
}

impl Sequence {
    pub const fn new(seed: u32) -> Self {
        Self {
            game_seed: seed,
            base_seed: seed,
        }
    }

    pub const fn game_seed(&self) -> u32 {
        self.game_seed
    }

    pub const fn base_seed(&self) -> u32 {
        self.base_seed
    }

    /// Step at position `index` (0-based) of the current game.
    pub fn step_at(&self, index: u8) -> Step {
        let (_, step) = next_step(advance(self.game_seed, index as u32));
        step
    }

    /// Move the game seed past a failed round of `round_length` steps.
    pub fn advance_past(&mut self, round_length: u8) {
        self.game_seed = advance(self.game_seed, round_length as u32);
    }

    /// Start over from a new seed; it also becomes the reset target.
    pub fn reseed(&mut self, seed: u32) {
        self.game_seed = seed;
        self.base_seed = seed;
    }

    /// Return to the last seed set by `new` or `reseed`.
    pub fn restart(&mut self) {
        self.game_seed = self.base_seed;
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new(CONFIG.initial_seed)
    }
}

/// Iterator over the step stream starting from a seed.
pub struct Steps {
    state: u32,
}

impl Steps {
    pub const fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl Iterator for Steps {
    type Item = Step;

    #[inline]
    fn next(&mut self) -> Option<Step> {
        let (state, step) = next_step(self.state);
        self.state = state;
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_shift_only_when_low_bit_clear() {
        let (state, step) = next_step(0b1000);
        assert_eq!(state, 0b100);
        assert_eq!(step, Step::One);
    }

    #[test]
    fn test_next_step_applies_mask_when_low_bit_set() {
        let (state, step) = next_step(1);
        assert_eq!(state, LFSR_MASK);
        assert_eq!(step, Step::Four); // 0xAB & 3 == 3
    }

    #[test]
    fn test_initial_seed_first_steps() {
        // 0x12236632 >> 1 = 0x0911B319, low bit was 0
        let (s1, step1) = next_step(0x1223_6632);
        assert_eq!(s1, 0x0911_B319);
        assert_eq!(step1, Step::Two);

        // 0x0911B319 >> 1 = 0x0488D98C, ^ 0xE2025CAB = 0xE68A8527
        let (s2, step2) = next_step(s1);
        assert_eq!(s2, 0xE68A_8527);
        assert_eq!(step2, Step::Four);
    }

    #[test]
    fn test_zero_is_fixed_point() {
        assert_eq!(next_step(0), (0, Step::One));
        assert!(Steps::from_seed(0).take(50).all(|s| s == Step::One));
    }

    #[test]
    fn test_step_at_matches_iterator() {
        let seq = Sequence::new(0xDEAD_BEEF);
        for (i, expected) in Steps::from_seed(0xDEAD_BEEF).take(32).enumerate() {
            assert_eq!(seq.step_at(i as u8), expected);
        }
    }

    #[test]
    fn test_advance_past_then_restart() {
        let mut seq = Sequence::new(0x1234_5678);
        seq.advance_past(3);
        assert_eq!(seq.game_seed(), advance(0x1234_5678, 3));
        assert_eq!(seq.base_seed(), 0x1234_5678);

        seq.restart();
        assert_eq!(seq.game_seed(), 0x1234_5678);
    }
}

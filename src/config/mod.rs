//! Module: config
//!
//! Purpose: Compile-time configuration for the Simon game.
//!
//! Architecture:
//! - `GameConfig`: every tunable constant in one `const`-constructible struct
//! - `CONFIG`: the default instance the firmware and simulator run with
//! - Settings changed at runtime from the serial console (tone octave, delay
//!   override) are not here: they cross the interrupt boundary and live in
//!   lock-free atomics (see `audio::tones` and `events`)
//!
//! Safety: Safe. Plain data, no interior mutability.

/// Game configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// LFSR register value at power-up.
    pub initial_seed: u32,

    /// Galois feedback mask applied when a 1 bit is shifted out.
    pub lfsr_mask: u32,

    /// Shortest playback delay (knob fully clockwise).
    pub min_delay_ms: u16,

    /// Longest playback delay (knob fully anticlockwise).
    pub max_delay_ms: u16,

    /// Name entry gives up after this long without a byte.
    pub name_timeout_ms: u16,

    /// Clock interrupt period.
    pub tick_ms: u16,

    /// Debounce sampling and display multiplex period.
    pub debounce_tick_ms: u16,

    /// Serial console baud rate.
    pub baud_rate: u32,
}

impl GameConfig {
    /// Default configuration.
    pub const fn new() -> Self {
        Self {
            initial_seed: 0x1223_6632,
            lfsr_mask: 0xE202_5CAB,
            min_delay_ms: 250,
            max_delay_ms: 2000,
            name_timeout_ms: 5000,
            tick_ms: 1,
            debounce_tick_ms: 5,
            baud_rate: 9600,
        }
    }

    /// Map an 8-bit potentiometer reading onto the playback delay range.
    ///
    /// The knob is wired so that turning clockwise raises the reading and
    /// shortens the delay: 0 gives `max_delay_ms`, 255 gives `min_delay_ms`.
    #[inline]
    pub fn delay_from_reading(&self, reading: u8) -> u16 {
        let span = (self.max_delay_ms - self.min_delay_ms) as u32;
        let reversed = (255 - reading) as u32;
        self.min_delay_ms + (reversed * span / 255) as u16
    }

    /// Clamp an arbitrary delay into the configured range.
    #[inline]
    pub fn clamp_delay(&self, delay_ms: u16) -> u16 {
        delay_ms.clamp(self.min_delay_ms, self.max_delay_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration the game runs with.
pub const CONFIG: GameConfig = GameConfig::new();

/// Number of buttons (and distinct steps).
pub const BUTTON_COUNT: usize = 4;

/// Maximum player name length in bytes.
pub const NAME_CAPACITY: usize = 20;

/// Leaderboard size.
pub const LEADERBOARD_CAPACITY: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_from_reading_endpoints() {
        assert_eq!(CONFIG.delay_from_reading(0), 2000);
        assert_eq!(CONFIG.delay_from_reading(255), 250);
    }

    #[test]
    fn test_delay_from_reading_midpoint() {
        // 250 + 128 * 1750 / 255 = 250 + 878
        assert_eq!(CONFIG.delay_from_reading(127), 1128);
    }

    #[test]
    fn test_clamp_delay() {
        assert_eq!(CONFIG.clamp_delay(10), 250);
        assert_eq!(CONFIG.clamp_delay(5000), 2000);
        assert_eq!(CONFIG.clamp_delay(900), 900);
    }
}

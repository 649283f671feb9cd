//! Hardware Abstraction Layer for the Simon game.
//!
//! The game logic only sees these traits. Boards (ESP32 firmware, host
//! simulator, test mocks) implement them; business logic stays in core
//! modules, the HAL is just I/O.

pub mod gpio;
pub mod segments;

pub use segments::{DisplayFrame, Frame, Multiplexer};

/// Seven-segment output.
pub trait Display {
    /// Show a frame until the next call.
    fn show(&mut self, frame: Frame);

    fn clear(&mut self) {
        self.show(Frame::BLANK);
    }
}

/// Piezo buzzer.
pub trait Buzzer {
    /// Start (or retune) the tone.
    fn play_tone(&mut self, frequency_hz: u16);

    fn stop_tone(&mut self);
}

/// Playback speed potentiometer.
pub trait DelayKnob {
    /// 8-bit reading, 0 fully counter-clockwise.
    fn reading(&mut self) -> u8;
}

/// Everything the game drives.
pub trait Board: Display + Buzzer + DelayKnob {}

impl<T: Display + Buzzer + DelayKnob> Board for T {}

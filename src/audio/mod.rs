//! Audio subsystem for the step tones
//!
//! Architecture:
//! - Tone table: four base notes, octave shifted from the serial console
//! - Buzzer hardware (PWM) sits behind `hal::Buzzer`

pub mod tones;

pub use tones::{ToneBank, BASE_FREQUENCIES_HZ};

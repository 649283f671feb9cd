//! Pin assignments for the ESP32-S3 board.
//!
//! The potentiometer is not listed: the ADC driver needs the typed pin, so it
//! is fixed to GPIO1 (ADC1 channel 0) in the board code.

/// Push buttons S1..S4, wired to ground with internal pull-ups.
pub struct ButtonPins {
    pub pins: [i32; 4],
}

impl Default for ButtonPins {
    fn default() -> Self {
        Self { pins: [4, 5, 6, 7] }
    }
}

/// Buzzer on an LEDC PWM channel.
pub struct BuzzerConfig {
    pub pin: i32,
    /// Duty in percent while a tone sounds.
    pub duty_percent: u8,
}

impl Default for BuzzerConfig {
    fn default() -> Self {
        Self {
            pin: 15,
            duty_percent: 50,
        }
    }
}

/// 74HC595 driving both seven-segment digits over SPI.
pub struct DisplayConfig {
    pub sclk: i32,
    pub mosi: i32,
    pub latch: i32,
    pub baudrate_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sclk: 12,
            mosi: 11,
            latch: 10,
            baudrate_hz: 1_000_000,
        }
    }
}

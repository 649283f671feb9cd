//! Two-digit seven-segment frames.
//!
//! Segments are active-low, one bit each:
//!
//! ```text
//!  bit:  7    6   5   4   3   2   1   0
//!       LHS   F   A   B   G   C   D   E
//! ```
//!
//! Bit 7 selects the left digit on the shift register. The game task
//! publishes a `Frame` into `DisplayFrame`; the 5 ms interrupt alternates
//! the two digits out of it.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::lfsr::Step;

pub const SEG_F: u8 = 0b0011_1111;
pub const SEG_A: u8 = 0b0101_1111;
pub const SEG_B: u8 = 0b0110_1111;
pub const SEG_G: u8 = 0b0111_0111;
pub const SEG_C: u8 = 0b0111_1011;
pub const SEG_D: u8 = 0b0111_1101;
pub const SEG_E: u8 = 0b0111_1110;

/// All segments dark.
pub const OFF: u8 = 0b0111_1111;
/// Left-hand digit select.
pub const LHS: u8 = 0b1000_0000;

pub const BAR_LEFT: u8 = SEG_E & SEG_F;
pub const BAR_RIGHT: u8 = SEG_B & SEG_C;
/// Every segment lit.
pub const ALL_ON: u8 = 0x00;
pub const DASH: u8 = SEG_G;

pub const DIGITS: [u8; 10] = [
    0b000_1000, // 0
    0b110_1011, // 1
    0b100_0100, // 2
    0b100_0001, // 3
    0b010_0011, // 4
    0b001_0001, // 5
    0b001_0000, // 6
    0b100_1011, // 7
    0b000_0000, // 8
    0b000_0001, // 9
];

/// Segment bytes for both digits, without the select bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub left: u8,
    pub right: u8,
}

impl Frame {
    pub const BLANK: Self = Self { left: OFF, right: OFF };
    pub const SUCCESS: Self = Self { left: ALL_ON, right: ALL_ON };
    pub const FAIL: Self = Self { left: DASH, right: DASH };

    /// One vertical bar for a step.
    pub const fn step(step: Step) -> Self {
        match step {
            Step::One => Self { left: BAR_LEFT, right: OFF },
            Step::Two => Self { left: BAR_RIGHT, right: OFF },
            Step::Three => Self { left: OFF, right: BAR_LEFT },
            Step::Four => Self { left: OFF, right: BAR_RIGHT },
        }
    }

    /// Two decimal digits, leading zero kept. Scores past 99 wrap.
    pub const fn number(n: u8) -> Self {
        let n = n % 100;
        Self {
            left: DIGITS[(n / 10) as usize],
            right: DIGITS[(n % 10) as usize],
        }
    }

    /// Byte to shift out for the left digit.
    pub const fn left_byte(&self) -> u8 {
        self.left | LHS
    }

    /// Byte to shift out for the right digit.
    pub const fn right_byte(&self) -> u8 {
        self.right & !LHS
    }

    const fn pack(self) -> u16 {
        (self.left as u16) << 8 | self.right as u16
    }

    const fn unpack(v: u16) -> Self {
        Self {
            left: (v >> 8) as u8,
            right: v as u8,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Frame shared between the game task (writer) and the multiplex interrupt.
///
/// Both digits travel in one 16-bit atomic so the interrupt never shows
/// half of an old frame.
pub struct DisplayFrame(AtomicU16);

impl DisplayFrame {
    pub const fn new() -> Self {
        Self(AtomicU16::new(Frame::BLANK.pack()))
    }

    #[inline]
    pub fn publish(&self, frame: Frame) {
        self.0.store(frame.pack(), Ordering::Release);
    }

    #[inline]
    pub fn load(&self) -> Frame {
        Frame::unpack(self.0.load(Ordering::Acquire))
    }
}

impl Default for DisplayFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Which digit the multiplexer drives next. Owned by the 5 ms interrupt.
#[derive(Default)]
pub struct Multiplexer {
    right_next: bool,
}

impl Multiplexer {
    pub const fn new() -> Self {
        Self { right_next: false }
    }

    /// Next byte to latch into the shift register.
    pub fn next_byte(&mut self, frame: &DisplayFrame) -> u8 {
        let f = frame.load();
        let byte = if self.right_next { f.right_byte() } else { f.left_byte() };
        self.right_next = !self.right_next;
        byte
    }
}

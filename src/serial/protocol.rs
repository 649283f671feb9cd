//! Byte-at-a-time serial command parser
//!
//! ```text
//!                 9/o                       8 hex digits
//!   AWAITING_COMMAND ───▶ AWAITING_SEED ───────────────▶ Seed(u32)
//!         │   ▲                 │ non-hex
//!         │   └─────────────────┘
//!         │ d                 2 hex digits
//!         └──▶ AWAITING_PAYLOAD ───────────▶ Delay(u8)
//! ```
//!
//! The parser owns no shared state; the serial handler applies what it
//! returns.

use super::commands::{self, Command};
use super::error::ProtocolError;
use crate::lfsr::Step;

/// Hex digits in a seed.
pub const SEED_DIGITS: u8 = 8;

/// Hex digits in a delay payload.
pub const PAYLOAD_DIGITS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    AwaitingCommand,
    AwaitingPayload,
    AwaitingSeed,
}

/// A completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Press(Step),
    ToneDown,
    ToneUp,
    Reset,
    PrintScores,
    Seed(u32),
    Delay(u8),
}

/// Parser state, hex accumulator and digit count.
///
/// `Copy`, so the whole parser doubles as its own snapshot when name entry
/// diverts the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protocol {
    state: ParserState,
    accumulator: u32,
    digits: u8,
}

impl Protocol {
    pub const fn new() -> Self {
        Self {
            state: ParserState::AwaitingCommand,
            accumulator: 0,
            digits: 0,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Hex digits received so far in the current payload.
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// Feed one received byte.
    ///
    /// `Ok(None)` means the byte was consumed without completing a request.
    /// Every `Err` leaves the parser in `AwaitingCommand`.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Request>, ProtocolError> {
        match self.state {
            ParserState::AwaitingCommand => self.command(byte),
            ParserState::AwaitingSeed => {
                if !self.accumulate(byte)? {
                    return Ok(None);
                }
                let seed = self.finish();
                if seed == 0 {
                    return Err(ProtocolError::ZeroSeed);
                }
                Ok(Some(Request::Seed(seed)))
            }
            ParserState::AwaitingPayload => {
                if !self.accumulate(byte)? {
                    return Ok(None);
                }
                Ok(Some(Request::Delay(self.finish() as u8)))
            }
        }
    }

    /// Take the in-flight state out, leaving an idle parser behind.
    pub fn suspend(&mut self) -> Protocol {
        core::mem::replace(self, Protocol::new())
    }

    /// Put back state taken by `suspend`.
    pub fn resume(&mut self, saved: Protocol) {
        *self = saved;
    }

    /// Abandon any partial payload.
    pub fn reset(&mut self) {
        *self = Protocol::new();
    }

    fn command(&mut self, byte: u8) -> Result<Option<Request>, ProtocolError> {
        let Some(command) = commands::lookup(byte) else {
            if commands::is_ignorable(byte) {
                return Ok(None);
            }
            return Err(ProtocolError::UnknownCommand);
        };

        let request = match command {
            Command::Press(step) => Request::Press(step),
            Command::ToneDown => Request::ToneDown,
            Command::ToneUp => Request::ToneUp,
            Command::Reset => Request::Reset,
            Command::PrintScores => Request::PrintScores,
            Command::BeginSeed => {
                self.begin(ParserState::AwaitingSeed);
                return Ok(None);
            }
            Command::BeginDelay => {
                self.begin(ParserState::AwaitingPayload);
                return Ok(None);
            }
        };
        Ok(Some(request))
    }

    fn begin(&mut self, state: ParserState) {
        self.state = state;
        self.accumulator = 0;
        self.digits = 0;
    }

    /// Shift in one hex digit. `Ok(true)` once the payload is complete.
    fn accumulate(&mut self, byte: u8) -> Result<bool, ProtocolError> {
        let Some(nibble) = commands::hex_value(byte) else {
            self.reset();
            return Err(ProtocolError::InvalidHex);
        };

        self.accumulator = (self.accumulator << 4) | nibble as u32;
        self.digits += 1;

        let needed = match self.state {
            ParserState::AwaitingSeed => SEED_DIGITS,
            _ => PAYLOAD_DIGITS,
        };
        Ok(self.digits >= needed)
    }

    fn finish(&mut self) -> u32 {
        let value = self.accumulator;
        self.reset();
        value
    }
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(p: &mut Protocol, bytes: &[u8]) -> Vec<Result<Option<Request>, ProtocolError>> {
        bytes.iter().map(|&b| p.feed(b)).collect()
    }

    #[test]
    fn test_button_aliases() {
        let mut p = Protocol::new();
        assert_eq!(p.feed(b'1'), Ok(Some(Request::Press(Step::One))));
        assert_eq!(p.feed(b'w'), Ok(Some(Request::Press(Step::Two))));
        assert_eq!(p.feed(b'e'), Ok(Some(Request::Press(Step::Three))));
        assert_eq!(p.feed(b'4'), Ok(Some(Request::Press(Step::Four))));
    }

    #[test]
    fn test_seed_entry() {
        let mut p = Protocol::new();
        let results = feed_all(&mut p, b"9deadBEEF");
        assert!(results[..8].iter().all(|r| *r == Ok(None)));
        assert_eq!(results[8], Ok(Some(Request::Seed(0xDEAD_BEEF))));
        assert_eq!(p.state(), ParserState::AwaitingCommand);
    }

    #[test]
    fn test_seed_aborts_on_non_hex() {
        let mut p = Protocol::new();
        feed_all(&mut p, b"o12");
        assert_eq!(p.feed(b'x'), Err(ProtocolError::InvalidHex));
        assert_eq!(p.state(), ParserState::AwaitingCommand);
        // Next byte is a command again
        assert_eq!(p.feed(b'q'), Ok(Some(Request::Press(Step::One))));
    }

    #[test]
    fn test_zero_seed_rejected() {
        let mut p = Protocol::new();
        let results = feed_all(&mut p, b"900000000");
        assert_eq!(results[8], Err(ProtocolError::ZeroSeed));
        assert_eq!(p.state(), ParserState::AwaitingCommand);
    }

    #[test]
    fn test_delay_payload() {
        let mut p = Protocol::new();
        assert_eq!(p.feed(b'd'), Ok(None));
        assert_eq!(p.state(), ParserState::AwaitingPayload);
        assert_eq!(p.feed(b'8'), Ok(None));
        assert_eq!(p.feed(b'0'), Ok(Some(Request::Delay(0x80))));
    }

    #[test]
    fn test_unknown_and_ignorable() {
        let mut p = Protocol::new();
        assert_eq!(p.feed(b'z'), Err(ProtocolError::UnknownCommand));
        assert_eq!(p.feed(b'\r'), Ok(None));
        assert_eq!(p.feed(b'\n'), Ok(None));
    }

    #[test]
    fn test_suspend_resume_keeps_partial_seed() {
        let mut p = Protocol::new();
        feed_all(&mut p, b"91234");
        let saved = p.suspend();
        assert_eq!(p.state(), ParserState::AwaitingCommand);

        p.resume(saved);
        assert_eq!(p.digits(), 4);
        let results = feed_all(&mut p, b"5678");
        assert_eq!(results[3], Ok(Some(Request::Seed(0x1234_5678))));
    }
}

//! Serial console input.
//!
//! `SerialPort::on_byte` is the body of the UART RX interrupt (or the host
//! reader thread). It never touches game state: commands become flags in
//! `SerialEvents`, tone changes go straight to the `ToneBank`, and while the
//! game collects a name every byte is queued raw for it instead.

pub mod commands;
pub mod error;
pub mod name_queue;
pub mod protocol;

pub use commands::{write_help, Command, CommandDescriptor, COMMANDS};
pub use error::ProtocolError;
pub use name_queue::{NameQueue, NAME_QUEUE_SIZE};
pub use protocol::{ParserState, Protocol, Request};

use crate::shared::Shared;
use crate::{simon_debug, simon_info, simon_warn};

/// RX-side state: the command parser plus whatever it held when name entry
/// diverted the stream.
pub struct SerialPort {
    protocol: Protocol,
    suspended: Option<Protocol>,
}

impl SerialPort {
    pub const fn new() -> Self {
        Self {
            protocol: Protocol::new(),
            suspended: None,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Handle one received byte.
    pub fn on_byte(&mut self, byte: u8, shared: &Shared) {
        let now = shared.now_ms();

        if shared.events.is_diverted() {
            if self.suspended.is_none() {
                self.suspended = Some(self.protocol.suspend());
            }
            if !shared.names.push(byte) {
                simon_warn!(shared.isr_log, now, "name queue full, dropped {:#04x}", byte);
            }
            return;
        }

        if let Some(saved) = self.suspended.take() {
            self.protocol.resume(saved);
        }

        match self.protocol.feed(byte) {
            Ok(Some(request)) => apply(request, shared),
            Ok(None) => {}
            Err(e) => simon_warn!(shared.isr_log, now, "serial {:#04x}: {}", byte, e),
        }
    }
}

impl Default for SerialPort {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(request: Request, shared: &Shared) {
    let now = shared.now_ms();
    match request {
        Request::Press(step) => {
            simon_debug!(shared.isr_log, now, "serial press S{}", step.index() + 1);
            shared.events.inject_button(step);
        }
        Request::ToneDown => {
            if !shared.tones.halve() {
                simon_debug!(shared.isr_log, now, "tones at floor");
            }
        }
        Request::ToneUp => {
            if !shared.tones.double() {
                simon_debug!(shared.isr_log, now, "tones at ceiling");
            }
        }
        Request::Reset => {
            shared.tones.reset();
            shared.events.clear_delay_override();
            shared.events.request_reset();
            simon_info!(shared.isr_log, now, "reset requested");
        }
        Request::PrintScores => shared.events.request_scores(),
        Request::Seed(seed) => {
            shared.events.publish_seed(seed);
            simon_info!(shared.isr_log, now, "seed {:08x} pending", seed);
        }
        Request::Delay(reading) => {
            shared.events.set_delay_override(reading);
            simon_info!(shared.isr_log, now, "delay override {:#04x}", reading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfsr::Step;

    fn feed(port: &mut SerialPort, shared: &Shared, bytes: &[u8]) {
        for &b in bytes {
            port.on_byte(b, shared);
        }
    }

    #[test]
    fn test_press_reaches_events() {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        feed(&mut port, &shared, b"3");
        assert_eq!(shared.events.take_button(), Some(Step::Three));
    }

    #[test]
    fn test_diversion_queues_raw_bytes() {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        shared.events.set_diverted(true);
        feed(&mut port, &shared, b"1q");
        assert_eq!(shared.events.take_button(), None);
        assert_eq!(shared.names.pop(), Some(b'1'));
        assert_eq!(shared.names.pop(), Some(b'q'));
    }

    #[test]
    fn test_seed_survives_diversion() {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        feed(&mut port, &shared, b"9abcd");

        shared.events.set_diverted(true);
        feed(&mut port, &shared, b"Bo\n");
        shared.events.set_diverted(false);

        feed(&mut port, &shared, b"ef01");
        assert_eq!(shared.events.take_seed(), Some(0xABCD_EF01));
    }

    #[test]
    fn test_reset_restores_tones_and_clears_override() {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        feed(&mut port, &shared, b".d40");
        assert_eq!(shared.tones.shift(), 1);
        assert_eq!(shared.events.delay_override(), Some(0x40));

        feed(&mut port, &shared, b"p");
        assert_eq!(shared.tones.shift(), 0);
        assert_eq!(shared.events.delay_override(), None);
        assert!(shared.events.take_reset());
    }

    #[test]
    fn test_bad_input_logged_not_applied() {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        feed(&mut port, &shared, b"9zz");
        assert_eq!(shared.events.take_seed(), None);
        let entry = shared.isr_log.drain().unwrap();
        assert_eq!(entry.level, crate::logging::LogLevel::Warn);
    }
}

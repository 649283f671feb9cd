//! Serial console protocol, end to end through `SerialPort`

use simon_game::lfsr::Step;
use simon_game::logging::LogLevel;
use simon_game::serial::{ParserState, Protocol, ProtocolError, Request, COMMANDS};
use simon_game::{SerialPort, Shared};

fn feed(port: &mut SerialPort, shared: &Shared, bytes: &[u8]) {
    for &b in bytes {
        port.on_byte(b, shared);
    }
}

#[test]
fn test_every_button_alias() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    let aliases = [
        (b'1', Step::One),
        (b'q', Step::One),
        (b'2', Step::Two),
        (b'w', Step::Two),
        (b'3', Step::Three),
        (b'e', Step::Three),
        (b'4', Step::Four),
        (b'r', Step::Four),
    ];
    for (byte, step) in aliases {
        port.on_byte(byte, &shared);
        assert_eq!(shared.events.take_button(), Some(step), "key {:?}", byte as char);
    }
}

#[test]
fn test_tone_keys() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b".l");
    assert_eq!(shared.tones.shift(), 2);
    feed(&mut port, &shared, b",k,");
    assert_eq!(shared.tones.shift(), -1);
}

#[test]
fn test_reset_aliases() {
    for key in [b'0', b'p'] {
        let shared = Shared::new();
        let mut port = SerialPort::new();
        feed(&mut port, &shared, b".");
        port.on_byte(key, &shared);
        assert!(shared.events.take_reset());
        assert_eq!(shared.tones.shift(), 0);
    }
}

#[test]
fn test_seed_both_aliases_and_cases() {
    let shared = Shared::new();
    let mut port = SerialPort::new();

    feed(&mut port, &shared, b"9cafeBABE");
    assert_eq!(shared.events.take_seed(), Some(0xCAFE_BABE));

    feed(&mut port, &shared, b"o00000001");
    assert_eq!(shared.events.take_seed(), Some(1));
}

#[test]
fn test_seed_digits_are_not_commands() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"912341234");
    assert_eq!(shared.events.take_button(), None);
    assert!(!shared.events.take_reset());
    assert_eq!(shared.events.take_seed(), Some(0x1234_1234));
}

#[test]
fn test_aborted_seed_publishes_nothing() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"9abc!");
    assert_eq!(port.protocol().state(), ParserState::AwaitingCommand);
    assert_eq!(shared.events.take_seed(), None);

    let entry = shared.isr_log.drain().unwrap();
    assert_eq!(entry.level, LogLevel::Warn);
    assert!(entry.text().contains("E02"));
}

#[test]
fn test_zero_seed_rejected() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"900000000");
    assert_eq!(shared.events.take_seed(), None);
    assert!(shared.isr_log.drain().unwrap().text().contains("E03"));
}

#[test]
fn test_delay_payload() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"dfF");
    assert_eq!(shared.events.delay_override(), Some(0xFF));

    feed(&mut port, &shared, b"d1");
    assert_eq!(port.protocol().state(), ParserState::AwaitingPayload);
    feed(&mut port, &shared, b"g");
    assert_eq!(shared.events.delay_override(), Some(0xFF));
    assert_eq!(port.protocol().state(), ParserState::AwaitingCommand);
}

#[test]
fn test_scores_request() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"h");
    assert!(shared.events.take_scores_request());
}

#[test]
fn test_diversion_preserves_partial_seed() {
    let shared = Shared::new();
    let mut port = SerialPort::new();
    feed(&mut port, &shared, b"o0bad");

    shared.events.set_diverted(true);
    feed(&mut port, &shared, b"Zed\r");
    shared.events.set_diverted(false);

    assert_eq!(shared.events.take_seed(), None);
    feed(&mut port, &shared, b"f00d");
    assert_eq!(shared.events.take_seed(), Some(0x0BAD_F00D));

    let mut name = Vec::new();
    while let Some(b) = shared.names.pop() {
        name.push(b);
    }
    assert_eq!(name, b"Zed\r");
}

#[test]
fn test_line_endings_ignored() {
    let mut p = Protocol::new();
    for b in *b"\r\n \t" {
        assert_eq!(p.feed(b), Ok(None));
    }
    assert_eq!(p.feed(b'x'), Err(ProtocolError::UnknownCommand));
    assert_eq!(p.feed(b'4'), Ok(Some(Request::Press(Step::Four))));
}

#[test]
fn test_error_codes() {
    assert_eq!(ProtocolError::UnknownCommand.code(), "E01");
    assert_eq!(ProtocolError::InvalidHex.code(), "E02");
    assert_eq!(ProtocolError::ZeroSeed.code(), "E03");
    assert_eq!(
        format!("{}", ProtocolError::ZeroSeed),
        "E03: zero seed rejected"
    );
}

#[test]
fn test_command_table_has_eighteen_keys() {
    let keys: usize = COMMANDS.iter().map(|c| c.keys.len()).sum();
    assert_eq!(keys, 18);
}

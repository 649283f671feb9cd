//! Single-byte command table

use core::fmt::Write;

use crate::lfsr::Step;

/// What a command byte asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Simulated press of a button.
    Press(Step),
    /// Halve all tone frequencies.
    ToneDown,
    /// Double all tone frequencies.
    ToneUp,
    /// Default tones and a full game reset.
    Reset,
    /// Start an 8-hex-digit seed.
    BeginSeed,
    /// Start a 2-hex-digit playback delay override.
    BeginDelay,
    /// Print the leaderboard.
    PrintScores,
}

/// Command descriptor
pub struct CommandDescriptor {
    pub keys: &'static [u8],
    pub command: Command,
    pub brief: &'static str,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { keys: b"1q", command: Command::Press(Step::One), brief: "Press S1" },
    CommandDescriptor { keys: b"2w", command: Command::Press(Step::Two), brief: "Press S2" },
    CommandDescriptor { keys: b"3e", command: Command::Press(Step::Three), brief: "Press S3" },
    CommandDescriptor { keys: b"4r", command: Command::Press(Step::Four), brief: "Press S4" },
    CommandDescriptor { keys: b",k", command: Command::ToneDown, brief: "Tones down an octave" },
    CommandDescriptor { keys: b".l", command: Command::ToneUp, brief: "Tones up an octave" },
    CommandDescriptor { keys: b"0p", command: Command::Reset, brief: "Reset tones and game" },
    CommandDescriptor { keys: b"9o", command: Command::BeginSeed, brief: "Seed: 8 hex digits follow" },
    CommandDescriptor { keys: b"d", command: Command::BeginDelay, brief: "Delay: 2 hex digits follow" },
    CommandDescriptor { keys: b"h", command: Command::PrintScores, brief: "Print high scores" },
];

/// Look up the command bound to `byte`.
pub fn lookup(byte: u8) -> Option<Command> {
    COMMANDS
        .iter()
        .find(|c| c.keys.contains(&byte))
        .map(|c| c.command)
}

/// Write the command list, one `keys  brief` line each.
pub fn write_help(out: &mut dyn Write) -> core::fmt::Result {
    for c in COMMANDS {
        for (i, &k) in c.keys.iter().enumerate() {
            if i > 0 {
                out.write_char('/')?;
            }
            out.write_char(k as char)?;
        }
        writeln!(out, "\t{}", c.brief)?;
    }
    Ok(())
}

/// Bytes that are silently skipped between commands (line endings from terminals).
pub fn is_ignorable(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n' | b' ' | b'\t')
}

/// Value of an ASCII hex digit, either case.
pub fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

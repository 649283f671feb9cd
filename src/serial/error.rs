//! Serial protocol error types

/// Rejected serial input.
///
/// None of these reach the player: the handler logs them and the parser is
/// already back in AWAITING_COMMAND when they are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// E01: Byte is not a command
    UnknownCommand,
    /// E02: Non-hex byte inside a seed or delay payload
    InvalidHex,
    /// E03: Seed of all zeros (LFSR fixed point)
    ZeroSeed,
}

impl ProtocolError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::InvalidHex => "E02",
            Self::ZeroSeed => "E03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::InvalidHex => "invalid hex digit, entry cancelled",
            Self::ZeroSeed => "zero seed rejected",
        }
    }
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

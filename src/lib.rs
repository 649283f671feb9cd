//! # Simon
//!
//! Control core of a Simon memory game: an ever-lengthening LFSR step
//! sequence played back on a buzzer and a two-digit seven-segment display,
//! repeated on four push buttons or from a serial console, with a volatile
//! top-5 high-score table.
//!
//! ## Architecture
//!
//! Interrupt handlers (1 ms clock, 5 ms debounce/multiplex, serial RX) only
//! touch the lock-free [`Shared`] block. The [`Game`] state machine is polled
//! from the main loop, reads that block, and drives the board through the
//! [`hal`] traits. No locks, no allocation, no blocking waits.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod events;
pub mod game;
pub mod hal;
pub mod leaderboard;
pub mod lfsr;
pub mod log_drain;
pub mod logging;
pub mod serial;
pub mod shared;

pub use audio::ToneBank;
pub use clock::Clock;
pub use config::CONFIG;
pub use debounce::{ButtonSnapshot, ButtonState, Debouncer, Edges};
pub use events::SerialEvents;
pub use game::{Game, GameState};
pub use hal::{Board, Frame};
pub use leaderboard::{Leaderboard, PlayerName};
pub use lfsr::{Sequence, Step};
pub use serial::{ProtocolError, SerialPort};
pub use shared::Shared;

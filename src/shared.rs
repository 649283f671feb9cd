//! State shared between interrupt handlers and the polled game task.
//!
//! One static `Shared` per firmware image. Everything in it is lock-free;
//! each field documents which side writes it.

use crate::audio::ToneBank;
use crate::clock::Clock;
use crate::debounce::DebouncedLevel;
use crate::events::SerialEvents;
use crate::hal::DisplayFrame;
use crate::logging::LogStream;
use crate::serial::NameQueue;

pub struct Shared {
    /// Written by the 1 ms tick; `reset_elapsed` by the game.
    pub clock: Clock,
    /// Written by the 5 ms debounce interrupt.
    pub buttons: DebouncedLevel,
    /// Serial RX interrupt to game.
    pub events: SerialEvents,
    /// Name bytes while the game is in ENTER_NAME.
    pub names: NameQueue,
    /// Octave shift, changed from the serial RX interrupt.
    pub tones: ToneBank,
    /// Written by the game, scanned by the 5 ms interrupt.
    pub display: DisplayFrame,
    /// Interrupt-context log (serial RX only).
    pub isr_log: LogStream,
    /// Game task log.
    pub task_log: LogStream,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            clock: Clock::new(),
            buttons: DebouncedLevel::new(),
            events: SerialEvents::new(),
            names: NameQueue::new(),
            tones: ToneBank::new(),
            display: DisplayFrame::new(),
            isr_log: LogStream::new(),
            task_log: LogStream::new(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

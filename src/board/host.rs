//! Host simulator board.
//!
//! Stands in for the device on a desktop: a 1 ms ticker thread plays the
//! timer interrupt, a stdin reader thread plays the UART RX interrupt, and
//! the display and buzzer are rendered as text lines. There are no physical
//! buttons; play with the serial keys (`1`-`4` or `q`/`w`/`e`/`r`).
//!
//! Game output goes to stdout, log lines to stderr. `SIMON_KNOB` (0-255)
//! sets the simulated potentiometer reading.

use std::fmt;
use std::io::{self, Read, Write as _};
use std::thread;
use std::time::Duration;

use simon_game::hal::segments::{self, Frame};
use simon_game::hal::{Buzzer, DelayKnob, Display};
use simon_game::{simon_info, SerialPort, Shared, CONFIG};

pub type Error = io::Error;

/// Default knob position when `SIMON_KNOB` is unset.
const DEFAULT_KNOB: u8 = 128;

/// Line-buffered stdout console; flushes so prompts show up immediately.
pub struct Console;

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut out = io::stdout().lock();
        out.write_all(s.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|_| fmt::Error)
    }
}

pub struct LogSink;

impl fmt::Write for LogSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        io::stderr().write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

pub struct HostBoard {
    frame: Frame,
    knob: u8,
}

impl HostBoard {
    fn render(&self) -> String {
        format!("[{}{}]", glyph(self.frame.left), glyph(self.frame.right))
    }
}

/// Two-character picture of one digit.
fn glyph(segs: u8) -> &'static str {
    const NUMERALS: [&str; 10] = [" 0", " 1", " 2", " 3", " 4", " 5", " 6", " 7", " 8", " 9"];
    match segs {
        segments::OFF => "  ",
        segments::BAR_LEFT => "| ",
        segments::BAR_RIGHT => " |",
        segments::DASH => "--",
        _ => segments::DIGITS
            .iter()
            .position(|&d| d == segs)
            .map_or("??", |n| NUMERALS[n]),
    }
}

impl Display for HostBoard {
    fn show(&mut self, frame: Frame) {
        if frame != self.frame {
            self.frame = frame;
            println!("  {}", self.render());
        }
    }
}

impl Buzzer for HostBoard {
    fn play_tone(&mut self, frequency_hz: u16) {
        println!("  ~ {} Hz", frequency_hz);
    }

    fn stop_tone(&mut self) {}
}

impl DelayKnob for HostBoard {
    fn reading(&mut self) -> u8 {
        self.knob
    }
}

pub struct Hardware {
    pub board: HostBoard,
    pub console: Console,
    log: LogSink,
}

impl Hardware {
    pub fn log_sink(&mut self) -> &mut dyn fmt::Write {
        &mut self.log
    }
}

pub fn start(shared: &'static Shared) -> io::Result<Hardware> {
    let knob = std::env::var("SIMON_KNOB")
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(DEFAULT_KNOB);

    thread::Builder::new().name("tick".into()).spawn(move || {
        let period = Duration::from_millis(CONFIG.tick_ms as u64);
        loop {
            thread::sleep(period);
            shared.clock.on_tick();
        }
    })?;

    thread::Builder::new().name("serial-rx".into()).spawn(move || {
        let mut port = SerialPort::new();
        for byte in io::stdin().lock().bytes() {
            match byte {
                Ok(b) => port.on_byte(b, shared),
                Err(_) => break,
            }
        }
    })?;

    simon_info!(shared.task_log, shared.now_ms(), "host simulator, knob {}", knob);

    Ok(Hardware {
        board: HostBoard {
            frame: Frame::BLANK,
            knob,
        },
        console: Console,
        log: LogSink,
    })
}

pub fn idle() {
    thread::sleep(Duration::from_millis(1));
}

//! Simon game entry point.
//!
//! Brings up a board (ESP32-S3 firmware or the host simulator), then polls
//! the game and drains the log streams forever. The board owns the interrupt
//! contexts; this loop is the single cooperative task.

use core::fmt::Write;

use simon_game::{log_drain, serial, simon_info, Game, Shared, CONFIG};

#[cfg_attr(target_os = "espidf", path = "board/esp.rs")]
#[cfg_attr(not(target_os = "espidf"), path = "board/host.rs")]
mod board;

static SHARED: Shared = Shared::new();

fn main() -> Result<(), board::Error> {
    let mut hw = board::start(&SHARED)?;

    let _ = writeln!(hw.console, "{}", env!("VERSION_STRING"));
    let _ = serial::write_help(&mut hw.console);
    simon_info!(SHARED.task_log, SHARED.now_ms(), "seed {:08x}", CONFIG.initial_seed);

    let mut game = Game::new();
    loop {
        game.tick(&SHARED, &mut hw.board, &mut hw.console);
        log_drain::drain_logs(&SHARED, hw.log_sink());
        board::idle();
    }
}

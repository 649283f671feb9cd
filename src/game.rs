//! Simon game state machine.
//!
//! Pure logic, no hardware dependencies. Polled once per main-loop
//! iteration; each `tick` does at most one state's worth of work and never
//! blocks. Every wait is an elapsed-time check against `Shared::clock`.
//!
//! ```text
//! GENERATE → PLAY_ON → PLAY_OFF ─┬─▶ PLAY_ON (more steps)
//!    ▲                           └─▶ AWAITING_INPUT → HANDLE_INPUT ─┬─▶ AWAITING_INPUT
//!    │                                                               ├─▶ SUCCESS ──▶ GENERATE
//!    │                                                               └─▶ FAIL → DISP_SCORE → DISP_BLANK
//!    └──────────────────────────── ENTER_NAME ◀── (top-N score) ─────────────────────┘
//! ```
//!
//! Timing unit is the round's playback delay, sampled once at the start of
//! each round: tones and gaps last half a delay, as does the minimum time an
//! input stays on show; result and score screens last a full delay.

use core::fmt::Write;

use crate::config::CONFIG;
use crate::debounce::{ButtonSnapshot, Edges};
use crate::hal::{Board, Frame};
use crate::leaderboard::{Leaderboard, PlayerName};
use crate::lfsr::{Sequence, Step};
use crate::shared::Shared;
use crate::{simon_debug, simon_info};

/// Game FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Generate,
    PlayOn,
    PlayOff,
    AwaitingInput,
    HandleInput,
    Success,
    Fail,
    DispScore,
    DispBlank,
    EnterName,
}

/// The button being handled in HANDLE_INPUT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Held {
    step: Step,
    released: bool,
}

/// Game processor.
///
/// Owns everything the game mutates. Interrupt-side state is reached only
/// through the `Shared` block passed into `tick`.
pub struct Game {
    state: GameState,
    sequence: Sequence,

    round_length: u8,
    playback_index: u8,
    input_index: u8,
    delay_ms: u16,

    buttons: ButtonSnapshot,
    held: Option<Held>,

    /// Tone currently sounding and the frequency it was started at.
    sounding: Option<(Step, u16)>,

    score: u8,
    leaderboard: Leaderboard,
    name: PlayerName,
}

impl Game {
    pub fn new() -> Self {
        Self::with_seed(CONFIG.initial_seed)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self {
            state: GameState::Generate,
            sequence: Sequence::new(seed),
            round_length: 1,
            playback_index: 0,
            input_index: 0,
            delay_ms: CONFIG.max_delay_ms,
            buttons: ButtonSnapshot::new(),
            held: None,
            sounding: None,
            score: 0,
            leaderboard: Leaderboard::new(),
            name: PlayerName::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round_length(&self) -> u8 {
        self.round_length
    }

    pub fn game_seed(&self) -> u32 {
        self.sequence.game_seed()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn playback_index(&self) -> u8 {
        self.playback_index
    }

    pub fn input_index(&self) -> u8 {
        self.input_index
    }

    /// Playback delay of the current round.
    pub fn delay_ms(&self) -> u16 {
        self.delay_ms
    }

    /// Score of the last failed game.
    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Run one poll of the FSM.
    ///
    /// `out` is the console; write errors are ignored, there is nowhere to
    /// report them.
    pub fn tick<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B, out: &mut dyn Write) {
        let edges = self.buttons.update(shared.buttons.load());

        // Serial presses only count while waiting for one, like button edges.
        if self.state != GameState::AwaitingInput {
            shared.events.discard_button();
        }

        if shared.events.take_reset() {
            self.reset(shared, board);
            return;
        }

        if shared.events.take_scores_request() {
            let _ = self.leaderboard.print(out);
        }

        self.retune(shared, board);

        let entered_from = self.state;
        match self.state {
            GameState::Generate => self.tick_generate(shared, board),
            GameState::PlayOn => self.tick_play_on(shared, board),
            GameState::PlayOff => self.tick_play_off(shared, board),
            GameState::AwaitingInput => self.tick_awaiting_input(shared, board, edges),
            GameState::HandleInput => self.tick_handle_input(shared, board, out),
            GameState::Success => self.tick_success(shared, board),
            GameState::Fail => self.tick_fail(shared, board),
            GameState::DispScore => self.tick_disp_score(shared, board),
            GameState::DispBlank => self.tick_disp_blank(shared, out),
            GameState::EnterName => self.tick_enter_name(shared, out),
        }

        // A press whose edge lands on the poll that starts waiting still counts.
        if entered_from != GameState::AwaitingInput && self.state == GameState::AwaitingInput {
            self.tick_awaiting_input(shared, board, edges);
        }
    }

    /// Unconditional restart from GENERATE with the last base seed.
    fn reset<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        self.silence(board);
        if self.state == GameState::EnterName {
            shared.events.set_diverted(false);
            shared.names.clear();
        }
        shared.events.discard_button();

        self.sequence.restart();
        self.round_length = 1;
        self.playback_index = 0;
        self.input_index = 0;
        self.held = None;

        simon_info!(
            shared.task_log,
            shared.now_ms(),
            "reset, seed {:08x}",
            self.sequence.game_seed()
        );
        self.enter(GameState::Generate, shared);
    }

    fn tick_generate<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if self.playback_index == 0 {
            if let Some(seed) = shared.events.take_seed() {
                self.sequence.reseed(seed);
                simon_info!(shared.task_log, shared.now_ms(), "new seed {:08x}", seed);
            }
            self.delay_ms = self.sample_delay(shared, board);
        }

        let step = self.sequence.step_at(self.playback_index);
        self.present(step, shared, board);
        shared.clock.reset_elapsed();
        self.enter(GameState::PlayOn, shared);
    }

    fn tick_play_on<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if shared.clock.elapsed_ms() >= self.half_delay() {
            self.silence(board);
            shared.clock.reset_elapsed();
            self.enter(GameState::PlayOff, shared);
        }
    }

    fn tick_play_off<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if shared.clock.elapsed_ms() < self.half_delay() {
            return;
        }

        self.playback_index += 1;
        if self.playback_index < self.round_length {
            let step = self.sequence.step_at(self.playback_index);
            self.present(step, shared, board);
            shared.clock.reset_elapsed();
            self.enter(GameState::PlayOn, shared);
        } else {
            self.playback_index = 0;
            self.input_index = 0;
            self.enter(GameState::AwaitingInput, shared);
        }
    }

    fn tick_awaiting_input<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B, edges: Edges) {
        // Physical press first; a serial press has no hold time so it is
        // released from the start.
        let held = match edges.first_pressed() {
            Some(step) => Held { step, released: false },
            None => match shared.events.take_button() {
                Some(step) => Held { step, released: true },
                None => return,
            },
        };

        self.present(held.step, shared, board);
        self.held = Some(held);
        shared.clock.reset_elapsed();
        self.enter(GameState::HandleInput, shared);
    }

    fn tick_handle_input<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B, out: &mut dyn Write) {
        let Some(mut held) = self.held else {
            self.enter(GameState::AwaitingInput, shared);
            return;
        };

        if !held.released && !self.buttons.current().is_pressed(held.step) {
            held.released = true;
            self.held = Some(held);
        }
        if !held.released || shared.clock.elapsed_ms() < self.half_delay() {
            return;
        }

        self.silence(board);
        self.held = None;

        let expected = self.sequence.step_at(self.input_index);
        if held.step != expected {
            simon_debug!(
                shared.task_log,
                shared.now_ms(),
                "input {} got S{} want S{}",
                self.input_index,
                held.step.index() + 1,
                expected.index() + 1
            );
            board.show(Frame::FAIL);
            let _ = write!(out, "GAME OVER\n{}\n", self.round_length);
            shared.clock.reset_elapsed();
            self.enter(GameState::Fail, shared);
            return;
        }

        self.input_index += 1;
        if self.input_index < self.round_length {
            self.enter(GameState::AwaitingInput, shared);
            return;
        }

        board.show(Frame::SUCCESS);
        let _ = write!(out, "SUCCESS\n{}\n", self.round_length);
        simon_info!(shared.task_log, shared.now_ms(), "round {} complete", self.round_length);
        shared.clock.reset_elapsed();
        self.enter(GameState::Success, shared);
    }

    fn tick_success<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if shared.clock.elapsed_ms() < self.delay_ms {
            return;
        }
        board.clear();
        self.round_length = self.round_length.saturating_add(1);
        self.playback_index = 0;
        self.input_index = 0;
        self.enter(GameState::Generate, shared);
    }

    fn tick_fail<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if shared.clock.elapsed_ms() < self.delay_ms {
            return;
        }

        self.sequence.advance_past(self.round_length);
        self.score = self.round_length;
        simon_info!(
            shared.task_log,
            shared.now_ms(),
            "game over, score {}, next seed {:08x}",
            self.score,
            self.sequence.game_seed()
        );

        self.round_length = 1;
        self.playback_index = 0;
        self.input_index = 0;

        board.show(Frame::number(self.score));
        shared.clock.reset_elapsed();
        self.enter(GameState::DispScore, shared);
    }

    fn tick_disp_score<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        if shared.clock.elapsed_ms() < self.delay_ms {
            return;
        }
        board.clear();
        shared.clock.reset_elapsed();
        self.enter(GameState::DispBlank, shared);
    }

    fn tick_disp_blank(&mut self, shared: &Shared, out: &mut dyn Write) {
        if shared.clock.elapsed_ms() < self.delay_ms {
            return;
        }

        if !self.leaderboard.is_top_n(self.score) {
            self.enter(GameState::Generate, shared);
            return;
        }

        self.name.clear();
        shared.names.clear();
        shared.events.set_diverted(true);
        let _ = write!(out, "Enter name: ");
        shared.clock.reset_elapsed();
        self.enter(GameState::EnterName, shared);
    }

    fn tick_enter_name(&mut self, shared: &Shared, out: &mut dyn Write) {
        while let Some(byte) = shared.names.pop() {
            if byte == b'\n' || byte == b'\r' {
                self.commit_name(shared, out);
                return;
            }
            self.name.push(byte);
            shared.clock.reset_elapsed();
        }

        if shared.clock.elapsed_ms() >= CONFIG.name_timeout_ms {
            self.commit_name(shared, out);
        }
    }

    fn commit_name(&mut self, shared: &Shared, out: &mut dyn Write) {
        shared.events.set_diverted(false);
        shared.names.clear();
        let _ = writeln!(out);

        self.leaderboard.insert(self.name, self.score);
        simon_info!(
            shared.task_log,
            shared.now_ms(),
            "high score {} '{}'",
            self.score,
            self.name.as_str()
        );
        self.enter(GameState::Generate, shared);
    }

    /// Light and sound one step.
    fn present<B: Board + ?Sized>(&mut self, step: Step, shared: &Shared, board: &mut B) {
        let hz = shared.tones.frequency(step);
        board.show(Frame::step(step));
        board.play_tone(hz);
        self.sounding = Some((step, hz));
    }

    fn silence<B: Board + ?Sized>(&mut self, board: &mut B) {
        board.stop_tone();
        board.clear();
        self.sounding = None;
    }

    /// Follow an octave change made while a tone is sounding.
    fn retune<B: Board + ?Sized>(&mut self, shared: &Shared, board: &mut B) {
        let Some((step, hz)) = self.sounding else {
            return;
        };
        let now = shared.tones.frequency(step);
        if now != hz {
            board.play_tone(now);
            self.sounding = Some((step, now));
        }
    }

    fn sample_delay<B: Board + ?Sized>(&self, shared: &Shared, board: &mut B) -> u16 {
        let reading = match shared.events.delay_override() {
            Some(r) => r,
            None => board.reading(),
        };
        CONFIG.clamp_delay(CONFIG.delay_from_reading(reading))
    }

    #[inline]
    fn half_delay(&self) -> u16 {
        self.delay_ms / 2
    }

    fn enter(&mut self, next: GameState, shared: &Shared) {
        simon_debug!(shared.task_log, shared.now_ms(), "{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

use crate::games::{GameLoop, Phase, Scheduled, SessionRng, TransitionError};
use crate::log;
use crate::tally::Tally;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::game_state::TicTacToeGameState;
use super::settings::TicTacToeSettings;
use super::types::{GameMode, GameStatus, Mark, MoveError};

/// Bot side in [`GameMode::VersusBot`].
pub const BOT_MARK: Mark = Mark::O;

/// Observer for a rendering or audio layer. All hooks default to no-ops.
pub trait SessionListener {
    fn on_phase_change(&mut self, _phase: Phase) {}
    fn on_move(&mut self, _mark: Mark, _index: usize, _board: &Board) {}
    fn on_game_over(&mut self, _status: GameStatus, _tally: &Tally) {}
}

pub struct NoopListener;

impl SessionListener for NoopListener {}

/// One player's seat at a tic-tac-toe table: owns the board, the lifecycle,
/// the running tally and a pending bot reply, if any.
pub struct TicTacToeSession<L: SessionListener = NoopListener> {
    settings: TicTacToeSettings,
    game_loop: GameLoop,
    game_state: TicTacToeGameState,
    tally: Tally,
    pending_bot_move: Option<Scheduled<Mark>>,
    rng: SessionRng,
    listener: L,
}

impl TicTacToeSession<NoopListener> {
    pub fn new(settings: TicTacToeSettings, seed: u64) -> Self {
        Self::with_listener(settings, seed, NoopListener)
    }
}

impl<L: SessionListener> TicTacToeSession<L> {
    pub fn with_listener(settings: TicTacToeSettings, seed: u64, listener: L) -> Self {
        let game_state = fresh_state(&settings);
        Self {
            settings,
            game_loop: GameLoop::new(),
            game_state,
            tally: Tally::default(),
            pending_bot_move: None,
            rng: SessionRng::new(seed),
            listener,
        }
    }

    /// Continues counting from a previously persisted tally.
    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = tally;
        self
    }

    pub fn settings(&self) -> &TicTacToeSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.game_loop.phase()
    }

    pub fn board(&self) -> &Board {
        self.game_state.board()
    }

    pub fn current_mark(&self) -> Mark {
        self.game_state.current_mark()
    }

    pub fn status(&self) -> GameStatus {
        self.game_state.status()
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn last_move(&self) -> Option<usize> {
        self.game_state.last_move()
    }

    pub fn winning_pattern(&self) -> Option<&[usize]> {
        self.game_state.winning_pattern()
    }

    pub fn is_bot_thinking(&self) -> bool {
        self.pending_bot_move.is_some()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        let generation = self.game_loop.start()?;
        self.game_state = fresh_state(&self.settings);
        self.pending_bot_move = None;
        log!("[tictactoe] Game {} started ({:?})", generation, self.settings.mode);
        self.listener.on_phase_change(Phase::Running);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.game_loop.pause()?;
        self.listener.on_phase_change(Phase::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.game_loop.resume()?;
        self.listener.on_phase_change(Phase::Running);
        Ok(())
    }

    /// Back to `Idle` with an empty board from any phase. A pending bot
    /// reply is dropped; the tally is kept.
    pub fn reset(&mut self) {
        self.game_loop.reset();
        self.game_state = fresh_state(&self.settings);
        self.pending_bot_move = None;
        self.listener.on_phase_change(Phase::Idle);
    }

    /// Human move for whoever is to play. In `VersusBot` mode the bot's reply
    /// is scheduled `bot_delay_ticks` ticks later.
    pub fn apply_move(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if !self.game_loop.is_running() {
            return Err(MoveError::NotRunning(self.game_loop.phase()));
        }
        if self.is_bot_turn() {
            return Err(MoveError::NotYourTurn);
        }

        let status = self.place(index)?;

        if !status.is_over() && self.is_bot_turn() {
            self.pending_bot_move = Some(Scheduled::new(
                &self.game_loop,
                self.settings.bot_delay_ticks,
                self.game_state.current_mark(),
            ));
        }

        Ok(status)
    }

    /// Advances the loop by one tick. Returns `true` if the board changed.
    pub fn tick(&mut self) -> bool {
        if !self.game_loop.tick() {
            return false;
        }

        let Some(scheduled) = self.pending_bot_move else {
            return false;
        };
        if scheduled.is_stale(&self.game_loop) {
            self.pending_bot_move = None;
            return false;
        }
        if !scheduled.is_due(&self.game_loop) {
            return false;
        }

        self.pending_bot_move = None;
        self.play_bot_turn(scheduled.into_action())
    }

    fn is_bot_turn(&self) -> bool {
        self.settings.mode == GameMode::VersusBot
            && (self.pending_bot_move.is_some() || self.game_state.current_mark() == BOT_MARK)
    }

    fn play_bot_turn(&mut self, bot_mark: Mark) -> bool {
        if self.game_state.current_mark() != bot_mark {
            return false;
        }

        let input = BotInput {
            board: self.game_state.board(),
            patterns: self.game_state.patterns(),
            current_mark: bot_mark,
        };
        let Some(index) = calculate_move(self.settings.bot, &input, &mut self.rng) else {
            log!("[tictactoe] Bot {:?} has no move to play", bot_mark);
            return false;
        };

        match self.place(index) {
            Ok(_) => true,
            Err(e) => {
                log!("[tictactoe] Bot {:?} failed to place mark at {}: {}", bot_mark, index, e);
                false
            }
        }
    }

    fn place(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        let mark = self.game_state.current_mark();
        let status = self.game_state.place_mark(index)?;
        self.listener.on_move(mark, index, self.game_state.board());

        if status.is_over() {
            self.finish(status);
        }
        Ok(status)
    }

    fn finish(&mut self, status: GameStatus) {
        if self.game_loop.finish().is_err() {
            return;
        }

        match status {
            GameStatus::XWon => self.tally.record_win(),
            GameStatus::OWon => self.tally.record_loss(),
            GameStatus::Draw => self.tally.record_draw(),
            GameStatus::InProgress => {}
        }
        self.pending_bot_move = None;

        log!(
            "[tictactoe] Game {} ended: {:?} (tally {}W/{}L/{}D)",
            self.game_loop.generation(),
            status,
            self.tally.wins,
            self.tally.losses,
            self.tally.draws
        );
        self.listener.on_phase_change(Phase::Ended);
        self.listener.on_game_over(status, &self.tally);
    }
}

fn fresh_state(settings: &TicTacToeSettings) -> TicTacToeGameState {
    TicTacToeGameState::new(settings.field_width, settings.field_height, settings.win_count)
}

mod game_loop;
mod session_rng;

pub mod sudoku;
pub mod tictactoe;

pub use game_loop::{GameLoop, LoopAction, Phase, Scheduled, TransitionError};
pub use session_rng::SessionRng;

/// Key under which each game's tally is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    TicTacToe,
    Sudoku,
}

impl GameKind {
    pub fn name(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Sudoku => "sudoku",
        }
    }
}

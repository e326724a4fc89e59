use super::board::Board;
use super::types::{GameStatus, Mark, MoveError};
use super::win_detector::{WinPatterns, evaluate_status, winning_pattern};

/// Board plus turn bookkeeping for a single game. Knows nothing about
/// phases or bots; the session decides who may move and when.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    patterns: WinPatterns,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(width: usize, height: usize, win_count: usize) -> Self {
        Self {
            board: Board::new(width, height),
            patterns: WinPatterns::new(width, height, win_count),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn patterns(&self) -> &WinPatterns {
        &self.patterns
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Places the current mark, re-evaluates the position and passes the
    /// turn if the game goes on. A rejected move leaves everything as it was.
    pub fn place_mark(&mut self, index: usize) -> Result<GameStatus, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        match self.board.get(index) {
            None => return Err(MoveError::OutOfBounds(index)),
            Some(Mark::Empty) => {}
            Some(_) => return Err(MoveError::CellOccupied(index)),
        }

        self.board.set(index, self.current_mark);
        self.last_move = Some(index);
        self.status = evaluate_status(&self.board, &self.patterns);

        if !self.status.is_over()
            && let Some(next) = self.current_mark.opponent()
        {
            self.current_mark = next;
        }

        Ok(self.status)
    }

    pub fn winning_pattern(&self) -> Option<&[usize]> {
        winning_pattern(&self.board, &self.patterns)
    }
}

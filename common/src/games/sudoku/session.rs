use std::fmt;
use std::time::Duration;

use crate::games::{GameLoop, Phase, TransitionError};
use crate::log;
use crate::tally::Tally;
use super::grid::{GRID_SIZE, Grid};
use super::puzzles::puzzle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Accepted,
    /// Stored, but clashes with another cell; counted as a mistake.
    Conflict,
    Solved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SudokuError {
    NotRunning(Phase),
    OutOfBounds { row: usize, col: usize },
    GivenCell { row: usize, col: usize },
    InvalidValue(u8),
    UnknownPuzzle(usize),
    Unsolvable,
    Parse(String),
}

impl fmt::Display for SudokuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::NotRunning(phase) => write!(f, "Game is not running ({})", phase),
            SudokuError::OutOfBounds { row, col } => write!(f, "Cell ({}, {}) is out of bounds", row, col),
            SudokuError::GivenCell { row, col } => write!(f, "Cell ({}, {}) is given", row, col),
            SudokuError::InvalidValue(value) => write!(f, "Value {} is not between 1 and 9", value),
            SudokuError::UnknownPuzzle(index) => write!(f, "No puzzle with index {}", index),
            SudokuError::Unsolvable => f.write_str("Puzzle has no solution"),
            SudokuError::Parse(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for SudokuError {}

pub trait SudokuListener {
    fn on_phase_change(&mut self, _phase: Phase) {}
    fn on_placement(&mut self, _row: usize, _col: usize, _value: u8, _placement: Placement) {}
    fn on_solved(&mut self, _elapsed_secs: u64, _mistakes: u32, _tally: &Tally) {}
}

pub struct NoopSudokuListener;

impl SudokuListener for NoopSudokuListener {}

pub struct SudokuSession<L: SudokuListener = NoopSudokuListener> {
    game_loop: GameLoop,
    puzzle_index: Option<usize>,
    puzzle: Grid,
    grid: Grid,
    solution: Grid,
    mistakes: u32,
    elapsed: Duration,
    tick_interval: Duration,
    tally: Tally,
    listener: L,
}

impl SudokuSession<NoopSudokuListener> {
    pub fn new(puzzle_index: usize, tick_interval: Duration) -> Result<Self, SudokuError> {
        Self::with_listener(puzzle_index, tick_interval, NoopSudokuListener)
    }
}

impl<L: SudokuListener> SudokuSession<L> {
    pub fn with_listener(puzzle_index: usize, tick_interval: Duration, listener: L) -> Result<Self, SudokuError> {
        let grid = load_builtin(puzzle_index)?;
        let mut session = Self::from_grid(grid, tick_interval, listener)?;
        session.puzzle_index = Some(puzzle_index);
        Ok(session)
    }

    /// Session over an arbitrary puzzle. The solution is computed up front so
    /// hints are always available.
    pub fn from_grid(puzzle: Grid, tick_interval: Duration, listener: L) -> Result<Self, SudokuError> {
        let solution = solve_copy(&puzzle)?;
        Ok(Self {
            game_loop: GameLoop::new(),
            puzzle_index: None,
            puzzle,
            grid: puzzle,
            solution,
            mistakes: 0,
            elapsed: Duration::ZERO,
            tick_interval,
            tally: Tally::default(),
            listener,
        })
    }

    pub fn with_tally(mut self, tally: Tally) -> Self {
        self.tally = tally;
        self
    }

    pub fn phase(&self) -> Phase {
        self.game_loop.phase()
    }

    pub fn puzzle_index(&self) -> Option<usize> {
        self.puzzle_index
    }

    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.puzzle.get(row, col).is_some_and(|value| value != 0)
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        let generation = self.game_loop.start()?;
        self.clear_progress();
        log!("[sudoku] Game {} started on puzzle {:?}", generation, self.puzzle_index);
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

    /// Back to `Idle` on the same puzzle.
    pub fn reset(&mut self) {
        self.game_loop.reset();
        self.clear_progress();
        self.listener.on_phase_change(Phase::Idle);
    }

    /// Same puzzle from scratch, running again right away.
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        self.reset();
        self.start()
    }

    /// Swaps in another built-in puzzle and goes back to `Idle`.
    pub fn load_puzzle(&mut self, puzzle_index: usize) -> Result<(), SudokuError> {
        let puzzle = load_builtin(puzzle_index)?;
        self.solution = solve_copy(&puzzle)?;
        self.puzzle = puzzle;
        self.puzzle_index = Some(puzzle_index);
        self.reset();
        Ok(())
    }

    pub fn place(&mut self, row: usize, col: usize, value: u8) -> Result<Placement, SudokuError> {
        self.check_editable(row, col)?;
        if !(1..=9).contains(&value) {
            return Err(SudokuError::InvalidValue(value));
        }

        self.grid.set(row, col, value);
        let placement = if self.grid.is_valid_placement(row, col, value) {
            self.complete_if_solved()
        } else {
            self.mistakes += 1;
            Placement::Conflict
        };

        self.listener.on_placement(row, col, value, placement);
        Ok(placement)
    }

    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), SudokuError> {
        self.check_editable(row, col)?;
        self.grid.set(row, col, 0);
        Ok(())
    }

    /// Fills the cell from the solution. Not counted as a mistake.
    pub fn hint(&mut self, row: usize, col: usize) -> Result<Placement, SudokuError> {
        self.check_editable(row, col)?;
        let value = self.solution.get(row, col).ok_or(SudokuError::OutOfBounds { row, col })?;

        self.grid.set(row, col, value);
        let placement = self.complete_if_solved();
        self.listener.on_placement(row, col, value, placement);
        Ok(placement)
    }

    /// Advances the clock by one tick interval while running.
    pub fn tick(&mut self) -> bool {
        if !self.game_loop.tick() {
            return false;
        }
        self.elapsed += self.tick_interval;
        true
    }

    fn check_editable(&self, row: usize, col: usize) -> Result<(), SudokuError> {
        if !self.game_loop.is_running() {
            return Err(SudokuError::NotRunning(self.game_loop.phase()));
        }
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(SudokuError::OutOfBounds { row, col });
        }
        if self.is_given(row, col) {
            return Err(SudokuError::GivenCell { row, col });
        }
        Ok(())
    }

    fn complete_if_solved(&mut self) -> Placement {
        if !self.grid.is_solved() || self.game_loop.finish().is_err() {
            return Placement::Accepted;
        }

        let secs = self.elapsed_secs();
        self.tally.record_win();
        let best = self.tally.record_time(secs);
        log!(
            "[sudoku] Puzzle {:?} solved in {}s with {} mistakes{}",
            self.puzzle_index,
            secs,
            self.mistakes,
            if best { " (new best)" } else { "" }
        );
        self.listener.on_phase_change(Phase::Ended);
        self.listener.on_solved(secs, self.mistakes, &self.tally);
        Placement::Solved
    }

    fn clear_progress(&mut self) {
        self.grid = self.puzzle;
        self.mistakes = 0;
        self.elapsed = Duration::ZERO;
    }
}

fn load_builtin(index: usize) -> Result<Grid, SudokuError> {
    puzzle(index)
        .ok_or(SudokuError::UnknownPuzzle(index))?
        .map_err(SudokuError::Parse)
}

fn solve_copy(puzzle: &Grid) -> Result<Grid, SudokuError> {
    let mut solution = *puzzle;
    if solution.solve() {
        Ok(solution)
    } else {
        Err(SudokuError::Unsolvable)
    }
}

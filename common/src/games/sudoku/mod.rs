mod grid;
mod puzzles;
mod session;
mod settings;

pub use grid::{BOX_SIZE, CELL_COUNT, GRID_SIZE, Grid};
pub use puzzles::{PUZZLES, puzzle, puzzle_count};
pub use session::{NoopSudokuListener, Placement, SudokuError, SudokuListener, SudokuSession};
pub use settings::SudokuSettings;

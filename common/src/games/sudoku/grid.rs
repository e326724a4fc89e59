use std::fmt;
use std::str::FromStr;

pub const GRID_SIZE: usize = 9;
pub const BOX_SIZE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// 9x9 sudoku grid; `0` marks an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self, String> {
        for (row, values) in rows.iter().enumerate() {
            if let Some(col) = values.iter().position(|&value| value > 9) {
                return Err(format!("Cell ({}, {}) holds {}, expected 0-9", row, col, values[col]));
            }
        }
        Ok(Self { cells: rows })
    }

    pub fn rows(&self) -> &[[u8; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row)?.get(col).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row][col] = value;
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&value| value != 0).count()
    }

    pub fn is_filled(&self) -> bool {
        self.filled_count() == CELL_COUNT
    }

    /// Whether `value` may stand at `(row, col)`: no other cell in the same
    /// row, column or box holds it. The cell's own content is ignored.
    pub fn is_valid_placement(&self, row: usize, col: usize, value: u8) -> bool {
        if row >= GRID_SIZE || col >= GRID_SIZE || !(1..=9).contains(&value) {
            return false;
        }

        let in_row = (0..GRID_SIZE).any(|c| c != col && self.cells[row][c] == value);
        let in_col = (0..GRID_SIZE).any(|r| r != row && self.cells[r][col] == value);
        if in_row || in_col {
            return false;
        }

        let box_row = row / BOX_SIZE * BOX_SIZE;
        let box_col = col / BOX_SIZE * BOX_SIZE;
        for r in box_row..box_row + BOX_SIZE {
            for c in box_col..box_col + BOX_SIZE {
                if (r, c) != (row, col) && self.cells[r][c] == value {
                    return false;
                }
            }
        }
        true
    }

    pub fn candidates(&self, row: usize, col: usize) -> Vec<u8> {
        (1..=9).filter(|&value| self.is_valid_placement(row, col, value)).collect()
    }

    /// No filled cell conflicts with another.
    pub fn is_consistent(&self) -> bool {
        self.filled_cells().all(|(row, col, value)| self.is_valid_placement(row, col, value))
    }

    pub fn is_solved(&self) -> bool {
        self.is_filled() && self.is_consistent()
    }

    /// Fills the grid in place. On failure the grid is left as it was.
    ///
    /// Backtracks on the empty cell with the fewest candidates, which keeps
    /// sparse puzzles to a few dozen nodes.
    pub fn solve(&mut self) -> bool {
        if !self.is_consistent() {
            return false;
        }
        self.solve_from_here()
    }

    fn solve_from_here(&mut self) -> bool {
        let Some((row, col, candidates)) = self.most_constrained_cell() else {
            return true;
        };

        for value in candidates {
            self.cells[row][col] = value;
            if self.solve_from_here() {
                return true;
            }
        }
        self.cells[row][col] = 0;
        false
    }

    fn most_constrained_cell(&self) -> Option<(usize, usize, Vec<u8>)> {
        let mut best: Option<(usize, usize, Vec<u8>)> = None;
        for (row, col) in self.empty_cells() {
            let candidates = self.candidates(row, col);
            let fewer = best.as_ref().is_none_or(|(_, _, current)| candidates.len() < current.len());
            if fewer {
                let forced = candidates.len() <= 1;
                best = Some((row, col, candidates));
                if forced {
                    break;
                }
            }
        }
        best
    }

    fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(col, &value)| (row, col, value))
        })
    }

    fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..CELL_COUNT)
            .map(|index| (index / GRID_SIZE, index % GRID_SIZE))
            .filter(|&(row, col)| self.cells[row][col] == 0)
    }
}

/// 81 cells in row order. Digits are values, `0` or `.` is empty; whitespace
/// and `/` are skipped so rows can be laid out for reading.
impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [[0u8; GRID_SIZE]; GRID_SIZE];
        let mut count = 0;
        for symbol in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let value = match symbol {
                '.' => 0,
                digit => digit
                    .to_digit(10)
                    .ok_or_else(|| format!("Unexpected symbol '{}' in sudoku grid", digit))? as u8,
            };
            if count < CELL_COUNT {
                cells[count / GRID_SIZE][count % GRID_SIZE] = value;
            }
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(format!("Sudoku grid needs {} cells, got {}", CELL_COUNT, count));
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, values) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &value in values {
                let symbol = if value == 0 { '.' } else { char::from(b'0' + value) };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const CLASSIC_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_parse_and_display() {
        let grid: Grid = CLASSIC.parse().unwrap();
        assert_eq!(grid.get(0, 0), Some(5));
        assert_eq!(grid.get(0, 2), Some(0));
        assert_eq!(grid.get(8, 8), Some(9));
        assert_eq!(grid.get(9, 0), None);
        assert_eq!(grid.filled_count(), 30);

        let shown = grid.to_string();
        assert_eq!(shown.lines().next(), Some("53..7...."));
        assert_eq!(shown.parse::<Grid>(), Ok(grid));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("123".parse::<Grid>().is_err());
        assert!(CLASSIC.replace('5', "x").parse::<Grid>().is_err());
        assert!(format!("{}1", CLASSIC).parse::<Grid>().is_err());
    }

    #[test]
    fn test_from_rows_rejects_values_above_nine() {
        let mut rows = [[0u8; GRID_SIZE]; GRID_SIZE];
        rows[4][7] = 10;
        assert!(Grid::from_rows(rows).unwrap_err().contains("(4, 7)"));
    }

    #[test]
    fn test_placement_checks_row_column_and_box() {
        let grid: Grid = CLASSIC.parse().unwrap();
        // Row 0 already has 3, column 2 has 8, box 0 has 9.
        assert!(!grid.is_valid_placement(0, 2, 3));
        assert!(!grid.is_valid_placement(0, 2, 8));
        assert!(!grid.is_valid_placement(0, 2, 9));
        assert!(grid.is_valid_placement(0, 2, 4));
        assert!(!grid.is_valid_placement(0, 2, 0));
        assert!(!grid.is_valid_placement(0, 9, 4));
    }

    #[test]
    fn test_placement_ignores_the_cell_itself() {
        let grid: Grid = CLASSIC.parse().unwrap();
        assert!(grid.is_valid_placement(0, 0, 5));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_candidates() {
        let grid: Grid = CLASSIC.parse().unwrap();
        assert_eq!(grid.candidates(0, 2), vec![1, 2, 4]);
    }

    #[test]
    fn test_solve_fills_unique_solution() {
        let mut grid: Grid = CLASSIC.parse().unwrap();
        assert!(grid.solve());
        assert!(grid.is_solved());
        assert_eq!(grid, CLASSIC_SOLUTION.parse().unwrap());
    }

    #[test]
    fn test_solved_grid_stays_as_is() {
        let mut grid: Grid = CLASSIC_SOLUTION.parse().unwrap();
        assert!(grid.solve());
        assert_eq!(grid, CLASSIC_SOLUTION.parse().unwrap());
    }

    #[test]
    fn test_unsolvable_grid_is_restored() {
        let text = format!("123456780/000000009{}", "0".repeat(63));
        let mut grid: Grid = text.parse().unwrap();
        assert!(grid.is_consistent());
        let before = grid;

        assert!(!grid.solve());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_inconsistent_grid_is_not_solved() {
        let text = format!("55{}", "0".repeat(79));
        let mut grid: Grid = text.parse().unwrap();
        assert!(!grid.is_consistent());
        assert!(!grid.solve());
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_empty_grid_solves() {
        let mut grid = Grid::new();
        assert!(grid.solve());
        assert!(grid.is_solved());
    }

    #[test]
    fn test_filled_but_conflicting_grid_is_not_solved() {
        let mut grid: Grid = CLASSIC_SOLUTION.parse().unwrap();
        let first = grid.get(0, 0).unwrap();
        let second = grid.get(0, 1).unwrap();
        grid.set(0, 0, second);
        assert!(grid.is_filled());
        assert!(!grid.is_solved());
        grid.set(0, 0, first);
        assert!(grid.is_solved());
    }
}

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use super::types::{Mark, Position};

/// Row-major grid of marks. The size is fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Mark>,
}

impl Board {
    /// A zero dimension gives a board without cells; use `from_cells` to
    /// have the size checked.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Mark::Empty; width * height],
        }
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Mark>) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!("Board dimensions must be positive, got {}x{}", width, height));
        }
        if cells.len() != width * height {
            return Err(format!(
                "Expected {} cells for a {}x{} board, got {}",
                width * height,
                width,
                height,
                cells.len()
            ));
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn index_of(&self, position: Position) -> Option<usize> {
        if position.x >= self.width || position.y >= self.height {
            return None;
        }
        Some(position.y * self.width + position.x)
    }

    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width.max(1);
        Position::new(index % width, index / width)
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    /// Places `mark` for the lifetime of the returned guard; the cell is
    /// emptied again when the guard drops, whichever way the scope exits.
    pub(crate) fn place_scoped(&mut self, index: usize, mark: Mark) -> PlacedMark<'_> {
        debug_assert_eq!(self.cells[index], Mark::Empty);
        self.cells[index] = mark;
        PlacedMark { board: self, index }
    }
}

pub struct PlacedMark<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for PlacedMark<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for PlacedMark<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for PlacedMark<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Mark::Empty;
    }
}

/// Indices of all empty cells, ascending.
pub fn available_moves(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

pub fn is_valid_move(board: &Board, index: usize) -> bool {
    board.get(index) == Some(Mark::Empty)
}

/// Rows separated by `/`, e.g. `"X.X/.O./..O"`.
impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if width == 0 {
            return Err("Board must have at least one column".to_string());
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for row in &rows {
            if row.chars().count() != width {
                return Err(format!("Row '{}' does not have {} cells", row, width));
            }
            for symbol in row.chars() {
                let mark = Mark::from_symbol(symbol)
                    .ok_or_else(|| format!("Unknown cell symbol '{}'", symbol))?;
                cells.push(mark);
            }
        }

        Board::from_cells(width, rows.len(), cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|mark| mark.symbol()).collect();
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3, 3);
        assert_eq!(board.len(), 9);
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(available_moves(&board), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_available_moves_skips_marked_cells() {
        let board: Board = "X.X/.O./..O".parse().unwrap();
        assert_eq!(available_moves(&board), vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert!(board.is_full());
        assert!(available_moves(&board).is_empty());
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!("XO/X".parse::<Board>().is_err());
        assert!("X?X/.../...".parse::<Board>().is_err());
    }

    #[test]
    fn test_position_index_conversion() {
        let board = Board::new(4, 3);
        assert_eq!(board.index_of(Position::new(1, 2)), Some(9));
        assert_eq!(board.position_of(9), Position::new(1, 2));
        assert_eq!(board.index_of(Position::new(4, 0)), None);
    }

    #[test]
    fn test_zero_sized_boards() {
        assert!(Board::from_cells(0, 0, vec![]).is_err());
        assert!(Board::from_cells(0, 3, vec![]).is_err());
        assert!(Board::from_cells(3, 0, vec![]).is_err());

        let board = Board::new(0, 3);
        assert_eq!(board.len(), 0);
        assert_eq!(board.to_string(), "");
        assert_eq!(board.index_of(Position::new(0, 0)), None);
        assert_eq!(board.position_of(2), Position::new(0, 2));
    }

    #[test]
    fn test_placed_mark_is_undone_on_drop() {
        let mut board = Board::new(3, 3);
        {
            let placed = board.place_scoped(4, Mark::X);
            assert_eq!(placed.get(4), Some(Mark::X));
        }
        assert_eq!(board, Board::new(3, 3));
    }

    #[test]
    fn test_nested_placements_unwind() {
        let mut board: Board = "X../.../...".parse().unwrap();
        let before = board.clone();
        {
            let mut outer = board.place_scoped(1, Mark::O);
            {
                let inner = outer.place_scoped(2, Mark::X);
                assert_eq!(inner.to_string(), "XOX\n...\n...");
            }
            assert_eq!(outer.get(2), Some(Mark::Empty));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_valid_move() {
        let board: Board = "X../.../...".parse().unwrap();
        assert!(!is_valid_move(&board, 0));
        assert!(is_valid_move(&board, 1));
        assert!(!is_valid_move(&board, 9));
    }
}

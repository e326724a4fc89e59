use super::board::Board;
use super::types::{GameStatus, Mark};

/// Every run of `win_count` cells that wins when uniformly marked.
/// Ordered rows, columns, down-right diagonals, down-left diagonals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinPatterns {
    width: usize,
    height: usize,
    win_count: usize,
    patterns: Vec<Vec<usize>>,
}

impl WinPatterns {
    pub fn new(width: usize, height: usize, win_count: usize) -> Self {
        let mut patterns = Vec::new();

        if win_count > 0 {
            let directions: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];
            for (dx, dy) in directions {
                for y in 0..height {
                    for x in 0..width {
                        if let Some(pattern) = run_from(width, height, win_count, x, y, dx, dy) {
                            patterns.push(pattern);
                        }
                    }
                }
            }
        }

        Self {
            width,
            height,
            win_count,
            patterns,
        }
    }

    /// 3x3, three in a row.
    pub fn classic() -> Self {
        Self::new(3, 3, 3)
    }

    pub fn win_count(&self) -> usize {
        self.win_count
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.patterns.iter().map(Vec::as_slice)
    }

    pub fn fits(&self, board: &Board) -> bool {
        self.width == board.width() && self.height == board.height()
    }
}

fn run_from(
    width: usize,
    height: usize,
    win_count: usize,
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
) -> Option<Vec<usize>> {
    let last = (win_count - 1) as isize;
    let end_x = x as isize + dx * last;
    let end_y = y as isize + dy * last;
    if end_x < 0 || end_y < 0 || end_x >= width as isize || end_y >= height as isize {
        return None;
    }

    Some(
        (0..win_count as isize)
            .map(|i| {
                let cx = (x as isize + dx * i) as usize;
                let cy = (y as isize + dy * i) as usize;
                cy * width + cx
            })
            .collect(),
    )
}

fn is_uniform(board: &Board, pattern: &[usize], mark: Mark) -> bool {
    pattern.iter().all(|&index| board.get(index) == Some(mark))
}

pub fn has_won(board: &Board, patterns: &WinPatterns, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }
    patterns.iter().any(|pattern| is_uniform(board, pattern, mark))
}

pub fn winner(board: &Board, patterns: &WinPatterns) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_won(board, patterns, mark))
}

pub fn winning_pattern<'p>(board: &Board, patterns: &'p WinPatterns) -> Option<&'p [usize]> {
    patterns.iter().find(|pattern| {
        let first = board.get(pattern[0]);
        first.is_some_and(|mark| mark != Mark::Empty && is_uniform(board, pattern, mark))
    })
}

pub fn is_draw(board: &Board, patterns: &WinPatterns) -> bool {
    board.is_full() && winner(board, patterns).is_none()
}

pub fn evaluate_status(board: &Board, patterns: &WinPatterns) -> GameStatus {
    if let Some(status) = winner(board, patterns).and_then(GameStatus::won_by) {
        return status;
    }
    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

use std::fmt;

use super::board::{Board, available_moves};
use super::types::Mark;
use super::win_detector::{WinPatterns, has_won, winner};

/// Weight growth per extra mark in an unblocked pattern: 1, 5, 25, ...
const HEURISTIC_BASE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: usize,
    pub score: i32,
    /// Positions visited, for logging and benchmarks.
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The board is full or already won.
    NoLegalMove,
    EmptyMark,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoLegalMove => f.write_str("No legal move on a finished board"),
            SearchError::EmptyMark => f.write_str("Cannot search for the empty mark"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Score of a win found at depth 0. Always above the deepest possible ply.
pub fn win_score(board: &Board) -> i32 {
    board.len() as i32 + 1
}

/// Best move for `mark` assuming the opponent answers optimally.
///
/// Scores are from `mark`'s point of view: `K - depth` for a win, `depth - K`
/// for a loss, `0` for a draw, where the root move itself is depth 1. With a
/// `max_depth`, positions still open at that depth are scored by
/// [`heuristic`]. Ties keep the lowest index.
pub fn find_best_move(
    board: &Board,
    patterns: &WinPatterns,
    mark: Mark,
    max_depth: Option<usize>,
) -> Result<SearchResult, SearchError> {
    let opponent = mark.opponent().ok_or(SearchError::EmptyMark)?;

    if winner(board, patterns).is_some() {
        return Err(SearchError::NoLegalMove);
    }
    let moves = available_moves(board);
    if moves.is_empty() {
        return Err(SearchError::NoLegalMove);
    }

    let mut search = Search {
        patterns,
        max_mark: mark,
        min_mark: opponent,
        win_score: win_score(board),
        max_depth: max_depth.unwrap_or(usize::MAX),
        nodes: 0,
    };
    let mut board = board.clone();
    let mut best: Option<SearchResult> = None;
    let mut alpha = i32::MIN;

    for index in moves {
        let score = {
            let mut placed = board.place_scoped(index, mark);
            search.minimax(&mut placed, 1, false, alpha, i32::MAX)
        };

        if best.is_none_or(|current| score > current.score) {
            best = Some(SearchResult { best_move: index, score, nodes: 0 });
            alpha = alpha.max(score);
        }
    }

    best.map(|result| SearchResult { nodes: search.nodes, ..result })
        .ok_or(SearchError::NoLegalMove)
}

struct Search<'p> {
    patterns: &'p WinPatterns,
    max_mark: Mark,
    min_mark: Mark,
    win_score: i32,
    max_depth: usize,
    nodes: u64,
}

impl Search<'_> {
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let depth_score = depth as i32;

        if has_won(board, self.patterns, self.max_mark) {
            return self.win_score - depth_score;
        }
        if has_won(board, self.patterns, self.min_mark) {
            return depth_score - self.win_score;
        }

        let moves = available_moves(board);
        if moves.is_empty() {
            return 0;
        }

        if depth >= self.max_depth {
            let bound = (self.win_score - depth_score - 1).max(0);
            return heuristic(board, self.patterns, self.max_mark).clamp(-bound, bound);
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for index in moves {
                let eval = {
                    let mut placed = board.place_scoped(index, self.max_mark);
                    self.minimax(&mut placed, depth + 1, false, alpha, beta)
                };
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for index in moves {
                let eval = {
                    let mut placed = board.place_scoped(index, self.min_mark);
                    self.minimax(&mut placed, depth + 1, true, alpha, beta)
                };
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

/// Static evaluation for `mark`: every pattern still open to one side only
/// counts `5^(n-1)` for its `n` marks, positive for `mark`, negative for
/// the opponent.
pub fn heuristic(board: &Board, patterns: &WinPatterns, mark: Mark) -> i32 {
    patterns.iter().fold(0i32, |score, pattern| {
        let mut own = 0u32;
        let mut opposing = 0u32;
        for &index in pattern {
            match board.get(index) {
                Some(Mark::Empty) | None => {}
                Some(cell) if cell == mark => own += 1,
                Some(_) => opposing += 1,
            }
        }

        let weight = match (own, opposing) {
            (0, 0) => 0,
            (own, 0) => HEURISTIC_BASE.saturating_pow(own - 1),
            (0, opposing) => -HEURISTIC_BASE.saturating_pow(opposing - 1),
            _ => 0,
        };
        score.saturating_add(weight)
    })
}

use crate::games::SessionRng;
use crate::log;
use super::board::{Board, available_moves};
use super::minimax::find_best_move;
use super::types::{BotKind, Mark};
use super::win_detector::WinPatterns;

pub struct BotInput<'a> {
    pub board: &'a Board,
    pub patterns: &'a WinPatterns,
    pub current_mark: Mark,
}

pub fn calculate_move(kind: BotKind, input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    match kind {
        BotKind::Random => calculate_random_move(input, rng),
        BotKind::Minimax { max_depth } => calculate_minimax_move(input, max_depth),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = available_moves(input.board);
    if available_moves.is_empty() {
        return None;
    }
    Some(available_moves[rng.pick_index(available_moves.len())])
}

pub fn calculate_minimax_move(input: &BotInput, max_depth: Option<usize>) -> Option<usize> {
    let open_cells = available_moves(input.board).len();
    let depth = max_depth.or_else(|| default_depth_limit(input.board.len(), open_cells));

    match find_best_move(input.board, input.patterns, input.current_mark, depth) {
        Ok(result) => {
            log!(
                "Minimax for {:?} ({} in a row): cell {} scored {} after {} nodes (depth limit {:?})",
                input.current_mark,
                input.patterns.win_count(),
                result.best_move,
                result.score,
                result.nodes,
                depth
            );
            Some(result.best_move)
        }
        Err(e) => {
            log!("Minimax for {:?} found no move: {}", input.current_mark, e);
            None
        }
    }
}

/// Classic boards are searched to the end; larger ones get a depth that
/// keeps a single reply well under a frame's worth of work.
pub fn default_depth_limit(cell_count: usize, open_cells: usize) -> Option<usize> {
    if cell_count <= 9 {
        return None;
    }
    Some(match open_cells {
        0..=9 => open_cells,
        10..=16 => 4,
        17..=36 => 3,
        _ => 2,
    })
}

use common::games::sudoku::{Grid, Placement, SudokuListener};
use common::games::tictactoe::{Board, GameStatus, Mark, SessionListener};
use common::games::{GameKind, Phase};
use common::tally::{FileTallyStore, Tally, TallyStore};
use common::log;

const BELL: char = '\x07';

pub fn board_to_text(board: &Board) -> String {
    let header: String = (1..=board.width()).map(|col| format!(" {}", col % 10)).collect();
    let mut text = format!(" {}\n", header);
    for (row, cells) in board.cells().chunks(board.width()).enumerate() {
        let line: String = cells.iter().map(|mark| format!(" {}", mark.symbol())).collect();
        text.push_str(&format!("{:>2}{}\n", row + 1, line));
    }
    text
}

pub fn grid_to_text(grid: &Grid) -> String {
    let mut text = String::from("    1 2 3   4 5 6   7 8 9\n");
    for (row, values) in grid.rows().iter().enumerate() {
        if row > 0 && row % 3 == 0 {
            text.push_str("   -------+-------+-------\n");
        }
        text.push_str(&format!("{:>2} ", row + 1));
        for (col, &value) in values.iter().enumerate() {
            if col > 0 && col % 3 == 0 {
                text.push_str(" |");
            }
            let symbol = if value == 0 { '.' } else { char::from(b'0' + value) };
            text.push(' ');
            text.push(symbol);
        }
        text.push('\n');
    }
    text
}

pub fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "Game in progress",
        GameStatus::XWon => "X wins!",
        GameStatus::OWon => "O wins!",
        GameStatus::Draw => "Draw!",
    }
}

fn save_tally(store: &FileTallyStore, game: GameKind, tally: &Tally) {
    if let Err(e) = store.store_tally(game, *tally) {
        log!("Failed to save {} tally: {}", game.name(), e);
    }
}

/// Prints the board after every move, rings the terminal bell when a game
/// ends and persists the tally.
pub struct TerminalTicTacToe {
    store: FileTallyStore,
}

impl TerminalTicTacToe {
    pub fn new(store: FileTallyStore) -> Self {
        Self { store }
    }
}

impl SessionListener for TerminalTicTacToe {
    fn on_phase_change(&mut self, phase: Phase) {
        match phase {
            Phase::Paused => println!("Paused. Type 'r' to resume."),
            Phase::Running => println!("Your move: row col"),
            Phase::Idle | Phase::Ended => {}
        }
    }

    fn on_move(&mut self, mark: Mark, index: usize, board: &Board) {
        let position = board.position_of(index);
        println!("{} -> {} {}", mark.symbol(), position.y + 1, position.x + 1);
        print!("{}", board_to_text(board));
    }

    fn on_game_over(&mut self, status: GameStatus, tally: &Tally) {
        println!(
            "{}{} Wins {} / Losses {} / Draws {}. Type 'n' for a new game or 'q' to quit.",
            BELL,
            status_text(status),
            tally.wins,
            tally.losses,
            tally.draws
        );
        save_tally(&self.store, GameKind::TicTacToe, tally);
    }
}

pub struct TerminalSudoku {
    store: FileTallyStore,
}

impl TerminalSudoku {
    pub fn new(store: FileTallyStore) -> Self {
        Self { store }
    }
}

impl SudokuListener for TerminalSudoku {
    fn on_phase_change(&mut self, phase: Phase) {
        if phase == Phase::Paused {
            println!("Paused. Type 'r' to resume.");
        }
    }

    fn on_placement(&mut self, row: usize, col: usize, value: u8, placement: Placement) {
        if placement == Placement::Conflict {
            println!("{}{} clashes at row {} column {}", BELL, value, row + 1, col + 1);
        }
    }

    fn on_solved(&mut self, elapsed_secs: u64, mistakes: u32, tally: &Tally) {
        let best = tally.best_time_secs.map(format_clock).unwrap_or_default();
        println!(
            "{}Solved in {} with {} mistakes. Best time {}, puzzles solved {}.",
            BELL,
            format_clock(elapsed_secs),
            mistakes,
            best,
            tally.wins
        );
        save_tally(&self.store, GameKind::Sudoku, tally);
    }
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

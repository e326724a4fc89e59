use std::io::{BufRead, BufReader, Read};
use tokio::sync::mpsc;

pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    spawn_line_reader(std::io::stdin())
}

/// Forwards lines from a blocking reader on its own thread until EOF. The
/// receiver closes once the reader does. The thread is never joined, so a
/// read still pending at exit does not hold the process open.
pub fn spawn_line_reader<R: Read + Send + 'static>(reader: R) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in BufReader::new(reader).lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Restart,
    NewGame,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicTacToeCommand {
    /// Zero-based cell.
    Place { row: usize, col: usize },
    Control(Control),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudokuCommand {
    /// Zero-based cell.
    Place { row: usize, col: usize, value: u8 },
    Clear { row: usize, col: usize },
    Hint { row: usize, col: usize },
    Control(Control),
}

fn parse_control(word: &str) -> Option<Control> {
    match word {
        "p" | "pause" => Some(Control::Pause),
        "r" | "resume" => Some(Control::Resume),
        "restart" => Some(Control::Restart),
        "n" | "new" => Some(Control::NewGame),
        "q" | "quit" | "exit" => Some(Control::Quit),
        _ => None,
    }
}

/// Players type one-based coordinates.
fn parse_coordinate(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

/// `row col` places a mark; single words are controls.
pub fn parse_tictactoe_command(line: &str) -> Option<TicTacToeCommand> {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    match words.as_slice() {
        [word] => parse_control(word).map(TicTacToeCommand::Control),
        [row, col] => Some(TicTacToeCommand::Place {
            row: parse_coordinate(row)?,
            col: parse_coordinate(col)?,
        }),
        _ => None,
    }
}

/// `row col value` places, `c row col` clears, `h row col` asks for a hint.
pub fn parse_sudoku_command(line: &str) -> Option<SudokuCommand> {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    match words.as_slice() {
        [word] => parse_control(word).map(SudokuCommand::Control),
        [action, row, col] if action == "c" || action == "h" => {
            let row = parse_coordinate(row)?;
            let col = parse_coordinate(col)?;
            Some(if action == "c" {
                SudokuCommand::Clear { row, col }
            } else {
                SudokuCommand::Hint { row, col }
            })
        }
        [row, col, value] => Some(SudokuCommand::Place {
            row: parse_coordinate(row)?,
            col: parse_coordinate(col)?,
            value: value.parse().ok()?,
        }),
        _ => None,
    }
}

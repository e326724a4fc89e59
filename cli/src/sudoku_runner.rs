use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use common::games::sudoku::{SudokuSession, SudokuSettings, puzzle_count};
use common::games::{GameKind, Phase, SessionRng};
use common::tally::{FileTallyStore, TallyStore};
use common::log;
use crate::input::{Control, SudokuCommand, parse_sudoku_command, spawn_stdin_reader};
use crate::render::{TerminalSudoku, format_clock, grid_to_text};

const HELP: &str =
    "Commands: 'row col value' to place, 'c row col' to clear, 'h row col' for a hint, p(ause), r(esume), restart, n(ew), q(uit)";

type Session = SudokuSession<TerminalSudoku>;

pub async fn run_sudoku_game(
    settings: SudokuSettings,
    tick_interval: Duration,
    mut rng: SessionRng,
    tally_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let tally = FileTallyStore::new(tally_path)
        .load_tally(GameKind::Sudoku)
        .unwrap_or_else(|e| {
            log!("Failed to load tally, starting from zero: {}", e);
            Default::default()
        });

    let puzzle_index = settings.pick_puzzle(&mut rng);
    log!("Sudoku puzzle {}, seed {}", puzzle_index, rng.seed());

    let listener = TerminalSudoku::new(FileTallyStore::new(tally_path));
    let mut session = SudokuSession::with_listener(puzzle_index, tick_interval, listener)?.with_tally(tally);

    println!("{}", HELP);
    session.start()?;
    show(&session);

    let mut commands = spawn_stdin_reader();
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.tick();
            }
            line = commands.recv() => {
                let Some(line) = line else {
                    break;
                };
                let result = match parse_sudoku_command(&line) {
                    Some(SudokuCommand::Control(Control::Quit)) => break,
                    Some(command) => apply_command(&mut session, &mut rng, command),
                    None => {
                        println!("{}", HELP);
                        continue;
                    }
                };
                match result {
                    Ok(()) if session.phase() != Phase::Paused => show(&session),
                    Ok(()) => {}
                    Err(e) => println!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    log!("Sudoku closed after {}", format_clock(session.elapsed_secs()));
    Ok(())
}

fn apply_command(session: &mut Session, rng: &mut SessionRng, command: SudokuCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        SudokuCommand::Place { row, col, value } => {
            session.place(row, col, value)?;
        }
        SudokuCommand::Clear { row, col } => session.clear(row, col)?,
        SudokuCommand::Hint { row, col } => {
            session.hint(row, col)?;
        }
        SudokuCommand::Control(Control::Pause) => session.pause()?,
        SudokuCommand::Control(Control::Resume) => session.resume()?,
        SudokuCommand::Control(Control::Restart) => session.restart()?,
        SudokuCommand::Control(Control::NewGame) => {
            session.load_puzzle(next_puzzle(session.puzzle_index(), rng))?;
            session.start()?;
        }
        SudokuCommand::Control(Control::Quit) => {}
    }
    Ok(())
}

/// Random puzzle other than the current one.
fn next_puzzle(current: Option<usize>, rng: &mut SessionRng) -> usize {
    let count = puzzle_count();
    match current {
        Some(current) if count > 1 => (current + 1 + rng.pick_index(count - 1)) % count,
        _ => rng.pick_index(count),
    }
}

fn show(session: &Session) {
    print!("{}", grid_to_text(session.grid()));
    println!(
        "Time {}  Mistakes {}  Filled {}/81",
        format_clock(session.elapsed_secs()),
        session.mistakes(),
        session.grid().filled_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_puzzle_never_repeats_current() {
        let mut rng = SessionRng::new(11);
        for current in 0..puzzle_count() {
            for _ in 0..20 {
                let next = next_puzzle(Some(current), &mut rng);
                assert_ne!(next, current);
                assert!(next < puzzle_count());
            }
        }
        assert!(next_puzzle(None, &mut rng) < puzzle_count());
    }
}

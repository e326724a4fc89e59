use std::path::Path;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use common::games::tictactoe::{GameMode, Position, TicTacToeSession, TicTacToeSettings};
use common::games::{GameKind, TransitionError};
use common::tally::{FileTallyStore, TallyStore};
use common::log;
use crate::input::{Control, TicTacToeCommand, parse_tictactoe_command, spawn_stdin_reader};
use crate::render::{TerminalTicTacToe, board_to_text};

const HELP: &str = "Commands: 'row col' to place, p(ause), r(esume), n(ew), q(uit)";

type Session = TicTacToeSession<TerminalTicTacToe>;

pub async fn run_tictactoe_game(
    settings: TicTacToeSettings,
    tick_interval: Duration,
    seed: u64,
    tally_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let tally = FileTallyStore::new(tally_path)
        .load_tally(GameKind::TicTacToe)
        .unwrap_or_else(|e| {
            log!("Failed to load tally, starting from zero: {}", e);
            Default::default()
        });

    let listener = TerminalTicTacToe::new(FileTallyStore::new(tally_path));
    let mut session = TicTacToeSession::with_listener(settings, seed, listener).with_tally(tally);

    let settings = session.settings();
    log!(
        "TicTacToe {}x{} ({} in a row), {:?}, bot {:?}, seed {}",
        settings.field_width,
        settings.field_height,
        settings.win_count,
        settings.mode,
        settings.bot,
        seed
    );
    let versus_bot = settings.mode == GameMode::VersusBot;

    println!("{}", HELP);
    if versus_bot {
        println!("You play X, the bot plays O.");
    }
    print!("{}", board_to_text(session.board()));
    session.start()?;

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
                match parse_tictactoe_command(&line) {
                    Some(TicTacToeCommand::Place { row, col }) => place(&mut session, row, col),
                    Some(TicTacToeCommand::Control(Control::Quit)) => break,
                    Some(TicTacToeCommand::Control(control)) => {
                        if let Err(e) = apply_control(&mut session, control) {
                            println!("{}", e);
                        }
                    }
                    None => println!("{}", HELP),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    log!("TicTacToe closed after {} games", session.tally().games_played());
    Ok(())
}

fn place(session: &mut Session, row: usize, col: usize) {
    let Some(index) = session.board().index_of(Position::new(col, row)) else {
        println!("Row {} column {} is off the board", row + 1, col + 1);
        return;
    };
    if let Err(e) = session.apply_move(index) {
        println!("{}", e);
    }
}

fn apply_control(session: &mut Session, control: Control) -> Result<(), TransitionError> {
    match control {
        Control::Pause => session.pause(),
        Control::Resume => session.resume(),
        Control::Restart | Control::NewGame => {
            session.reset();
            print!("{}", board_to_text(session.board()));
            session.start()
        }
        Control::Quit => Ok(()),
    }
}

mod config;
mod input;
mod render;
mod sudoku_runner;
mod tictactoe_runner;

use std::path::PathBuf;
use std::time::Duration;
use clap::{Parser, Subcommand, ValueEnum};
use common::config::Validate;
use common::games::sudoku::{Grid, SudokuSettings, puzzle};
use common::games::tictactoe::{BotKind, GameMode, TicTacToeSettings};
use common::games::SessionRng;
use common::logger::{self, LogTarget};
use common::log;
use config::{Config, get_config_manager};

#[derive(Parser)]
#[command(name = "mini_games_cli")]
struct Args {
    /// Config file; defaults to mini_games_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    use_log_prefix: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play tic-tac-toe against the bot or a friend.
    Tictactoe {
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        height: Option<usize>,
        #[arg(long)]
        win_count: Option<usize>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long, value_enum)]
        bot: Option<BotArg>,
        /// Minimax search depth in plies.
        #[arg(long)]
        depth: Option<usize>,
        #[arg(long)]
        bot_delay_ticks: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play one of the built-in sudoku puzzles.
    Sudoku {
        #[arg(long)]
        puzzle: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the solution of a built-in puzzle or of an 81-cell grid.
    Solve {
        /// Digits in row order, `0` or `.` for empty cells.
        grid: Option<String>,
        #[arg(long)]
        puzzle: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Bot,
    TwoPlayer,
}

#[derive(Clone, Copy, ValueEnum)]
enum BotArg {
    Random,
    Minimax,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Cli".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, LogTarget::Stderr);

    let config_manager = get_config_manager(args.config);
    let config = config_manager.get_config()?;
    let config_path = config_manager.file().path().to_path_buf();
    log!("Using config {}", config_path.display());

    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let tally_path = config.tally_path(&config_path);

    match args.command {
        Command::Tictactoe {
            width,
            height,
            win_count,
            mode,
            bot,
            depth,
            bot_delay_ticks,
            seed,
        } => {
            let mut settings = config.tictactoe.clone();
            apply_tictactoe_overrides(&mut settings, width, height, win_count, mode, bot, depth, bot_delay_ticks);
            settings.validate()?;
            let rng = session_rng(seed);
            tictactoe_runner::run_tictactoe_game(settings, tick_interval, rng.seed(), &tally_path).await?;
        }
        Command::Sudoku { puzzle, seed } => {
            let settings = SudokuSettings {
                puzzle: puzzle.or(config.sudoku.puzzle),
            };
            settings.validate()?;
            sudoku_runner::run_sudoku_game(settings, tick_interval, session_rng(seed), &tally_path).await?;
        }
        Command::Solve { grid, puzzle } => solve(&config, grid, puzzle)?,
    }

    Ok(())
}

fn session_rng(seed: Option<u64>) -> SessionRng {
    seed.map_or_else(SessionRng::from_random, SessionRng::new)
}

fn apply_tictactoe_overrides(
    settings: &mut TicTacToeSettings,
    width: Option<usize>,
    height: Option<usize>,
    win_count: Option<usize>,
    mode: Option<ModeArg>,
    bot: Option<BotArg>,
    depth: Option<usize>,
    bot_delay_ticks: Option<u64>,
) {
    if let Some(width) = width {
        settings.field_width = width;
    }
    if let Some(height) = height {
        settings.field_height = height;
    }
    if let Some(win_count) = win_count {
        settings.win_count = win_count;
    }
    if let Some(mode) = mode {
        settings.mode = match mode {
            ModeArg::Bot => GameMode::VersusBot,
            ModeArg::TwoPlayer => GameMode::TwoPlayer,
        };
    }
    if let Some(bot) = bot {
        settings.bot = match bot {
            BotArg::Random => BotKind::Random,
            BotArg::Minimax => BotKind::Minimax { max_depth: None },
        };
    }
    if let Some(depth) = depth
        && let BotKind::Minimax { max_depth } = &mut settings.bot
    {
        *max_depth = Some(depth);
    }
    if let Some(delay) = bot_delay_ticks {
        settings.bot_delay_ticks = delay;
    }
}

fn solve(config: &Config, grid: Option<String>, index: Option<usize>) -> Result<(), String> {
    let mut grid: Grid = match (grid, index.or(config.sudoku.puzzle)) {
        (Some(text), _) => text.parse()?,
        (None, Some(index)) => puzzle(index).ok_or_else(|| format!("No puzzle with index {}", index))??,
        (None, None) => return Err("Pass a grid or --puzzle".to_string()),
    };

    print!("{}", render::grid_to_text(&grid));
    if !grid.solve() {
        return Err("Puzzle has no solution".to_string());
    }
    println!();
    print!("{}", render::grid_to_text(&grid));
    Ok(())
}

mod board;
mod bot_controller;
mod game_state;
pub mod minimax;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, PlacedMark, available_moves, is_valid_move};
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move, default_depth_limit};
pub use game_state::TicTacToeGameState;
pub use minimax::{SearchError, SearchResult, find_best_move};
pub use session::{BOT_MARK, NoopListener, SessionListener, TicTacToeSession};
pub use settings::{MAX_FIELD_SIZE, MIN_FIELD_SIZE, TicTacToeSettings};
pub use types::{BotKind, GameMode, GameStatus, Mark, MoveError, Position};
pub use win_detector::{WinPatterns, evaluate_status, has_won, is_draw, winner, winning_pattern};

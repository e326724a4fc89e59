pub mod config;
pub mod games;
pub mod logger;
pub mod tally;

pub use games::{GameKind, GameLoop, Phase, SessionRng, TransitionError};
pub use tally::{FileTallyStore, Tally, TallyBook, TallyStore};

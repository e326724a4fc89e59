use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::YamlFile;
use crate::games::GameKind;

/// Cumulative results for one game. For tic-tac-toe, wins and losses are
/// counted from X's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    /// Fastest completion, for games that are solved rather than won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_secs: Option<u64>,
}

impl Tally {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    pub fn record_draw(&mut self) {
        self.draws += 1;
    }

    /// Returns `true` when `secs` beats the previous best.
    pub fn record_time(&mut self, secs: u64) -> bool {
        if self.best_time_secs.is_some_and(|best| best <= secs) {
            return false;
        }
        self.best_time_secs = Some(secs);
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyBook {
    #[serde(default)]
    games: BTreeMap<String, Tally>,
}

impl TallyBook {
    pub fn get(&self, game: GameKind) -> Tally {
        self.games.get(game.name()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, game: GameKind, tally: Tally) {
        self.games.insert(game.name().to_string(), tally);
    }
}

pub trait TallyStore {
    fn load(&self) -> Result<TallyBook, String>;
    fn save(&self, book: &TallyBook) -> Result<(), String>;

    fn load_tally(&self, game: GameKind) -> Result<Tally, String> {
        Ok(self.load()?.get(game))
    }

    /// Read-modify-write of a single game's entry.
    fn store_tally(&self, game: GameKind, tally: Tally) -> Result<(), String> {
        let mut book = self.load()?;
        book.set(game, tally);
        self.save(&book)
    }
}

pub struct FileTallyStore {
    file: YamlFile,
}

impl FileTallyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { file: YamlFile::new(path) }
    }
}

impl TallyStore for FileTallyStore {
    fn load(&self) -> Result<TallyBook, String> {
        Ok(self.file.read::<TallyBook>()?.unwrap_or_default())
    }

    fn save(&self, book: &TallyBook) -> Result<(), String> {
        self.file.write(book)
    }
}

use std::path::{Path, PathBuf};
use common::config::{ConfigManager, Validate};
use common::games::sudoku::SudokuSettings;
use common::games::tictactoe::TicTacToeSettings;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "mini_games_config.yaml";
const MIN_TICK_INTERVAL_MS: u64 = 10;
const MAX_TICK_INTERVAL_MS: u64 = 1000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(path: Option<PathBuf>) -> ConfigManager<Config> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub tictactoe: TicTacToeSettings,
    #[serde(default)]
    pub sudoku: SudokuSettings,
    pub tick_interval_ms: u64,
    /// Relative paths are resolved against the config file's directory.
    pub tally_file: String,
}

impl Config {
    pub fn tally_path(&self, config_path: &Path) -> PathBuf {
        let tally_file = Path::new(&self.tally_file);
        if tally_file.is_absolute() {
            return tally_file.to_path_buf();
        }
        match config_path.parent() {
            Some(dir) => dir.join(tally_file),
            None => tally_file.to_path_buf(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.tictactoe.validate()?;
        self.sudoku.validate()?;
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(format!(
                "tick_interval_ms must be between {} and {}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS
            ));
        }
        if self.tally_file.trim().is_empty() {
            return Err("tally_file must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tictactoe: TicTacToeSettings::default(),
            sudoku: SudokuSettings::default(),
            tick_interval_ms: 100,
            tally_file: "mini_games_tally.yaml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{from_yaml, to_yaml};
    use common::games::tictactoe::{BotKind, GameMode};

    fn get_temp_file_path() -> PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_mini_games_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serialized = to_yaml(&default_config).unwrap();
        let deserialized: Config = from_yaml(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_reloaded_manager() {
        let file_path = get_temp_file_path();
        let manager = get_config_manager(Some(file_path.clone()));
        assert_eq!(manager.get_config(), Ok(Config::default()));

        let mut config = Config::default();
        config.tictactoe.mode = GameMode::TwoPlayer;
        config.tictactoe.bot = BotKind::Minimax { max_depth: Some(3) };
        config.sudoku.puzzle = Some(2);
        config.tick_interval_ms = 50;
        manager.set_config(&config).unwrap();

        let reopened = get_config_manager(Some(file_path.clone()));
        assert_eq!(reopened.get_config(), Ok(config));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let file_path = get_temp_file_path();
        let mut config = Config::default();
        config.tick_interval_ms = 0;
        std::fs::write(&file_path, to_yaml(&config).unwrap()).unwrap();

        let manager = get_config_manager(Some(file_path.clone()));
        let error = manager.get_config().unwrap_err();
        assert!(error.contains("tick_interval_ms"));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_nested_settings_are_validated() {
        let mut config = Config::default();
        config.tictactoe.win_count = 4;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.sudoku.puzzle = Some(42);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tally_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tally_path_resolution() {
        let config = Config::default();
        let resolved = config.tally_path(Path::new("/opt/games/mini_games_config.yaml"));
        assert_eq!(resolved, PathBuf::from("/opt/games/mini_games_tally.yaml"));

        let absolute = Config {
            tally_file: std::env::temp_dir().join("t.yaml").to_string_lossy().into_owned(),
            ..Config::default()
        };
        assert_eq!(absolute.tally_path(Path::new("cfg.yaml")), std::env::temp_dir().join("t.yaml"));
    }
}

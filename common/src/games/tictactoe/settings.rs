use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{BotKind, GameMode};

pub const MIN_FIELD_SIZE: usize = 3;
pub const MAX_FIELD_SIZE: usize = 10;
pub const DEFAULT_BOT_DELAY_TICKS: u64 = 5;

fn default_bot_delay_ticks() -> u64 {
    DEFAULT_BOT_DELAY_TICKS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicTacToeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub win_count: usize,
    pub mode: GameMode,
    pub bot: BotKind,
    /// Running ticks between the human move and the bot's answer.
    #[serde(default = "default_bot_delay_ticks")]
    pub bot_delay_ticks: u64,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            field_width: 3,
            field_height: 3,
            win_count: 3,
            mode: GameMode::VersusBot,
            bot: BotKind::Minimax { max_depth: None },
            bot_delay_ticks: DEFAULT_BOT_DELAY_TICKS,
        }
    }
}

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        let size_range = MIN_FIELD_SIZE..=MAX_FIELD_SIZE;
        if !size_range.contains(&self.field_width) || !size_range.contains(&self.field_height) {
            return Err(format!(
                "TicTacToe field dimensions must be between {} and {}",
                MIN_FIELD_SIZE, MAX_FIELD_SIZE
            ));
        }
        let min_dimension = self.field_width.min(self.field_height);
        if self.win_count < 3 || self.win_count > min_dimension {
            return Err(format!(
                "win_count must be between 3 and {} (minimum field dimension)",
                min_dimension
            ));
        }
        if let BotKind::Minimax { max_depth: Some(0) } = self.bot {
            return Err("Minimax max_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{from_yaml, to_yaml};

    #[test]
    fn test_default_settings_are_valid() {
        assert!(TicTacToeSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_small_and_large_fields() {
        let small = TicTacToeSettings { field_width: 2, ..TicTacToeSettings::default() };
        assert!(small.validate().is_err());

        let large = TicTacToeSettings { field_height: 11, ..TicTacToeSettings::default() };
        assert!(large.validate().is_err());
    }

    #[test]
    fn test_win_count_cannot_exceed_smaller_dimension() {
        let settings = TicTacToeSettings {
            field_width: 5,
            field_height: 4,
            win_count: 5,
            ..TicTacToeSettings::default()
        };
        let error = settings.validate().unwrap_err();
        assert!(error.contains("between 3 and 4"));
    }

    #[test]
    fn test_zero_search_depth_is_invalid() {
        let settings = TicTacToeSettings {
            bot: BotKind::Minimax { max_depth: Some(0) },
            ..TicTacToeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_minimax_settings_survive_yaml() {
        let settings = TicTacToeSettings {
            bot: BotKind::Minimax { max_depth: Some(4) },
            ..TicTacToeSettings::default()
        };
        let yaml = to_yaml(&settings).unwrap();
        assert_eq!(from_yaml::<TicTacToeSettings>(&yaml), Ok(settings));
    }

    #[test]
    fn test_settings_yaml_uses_snake_case_names() {
        let settings = TicTacToeSettings {
            mode: GameMode::TwoPlayer,
            bot: BotKind::Random,
            ..TicTacToeSettings::default()
        };
        let yaml = to_yaml(&settings).unwrap();
        assert!(yaml.contains("mode: two_player"));
        assert!(yaml.contains("bot: random"));
        assert_eq!(from_yaml::<TicTacToeSettings>(&yaml), Ok(settings));
    }

    #[test]
    fn test_missing_bot_delay_matches_default_settings() {
        let yaml = "field_width: 4\nfield_height: 4\nwin_count: 3\nmode: versus_bot\nbot: random\n";
        let settings: TicTacToeSettings = from_yaml(yaml).unwrap();
        assert_eq!(settings.bot_delay_ticks, TicTacToeSettings::default().bot_delay_ticks);
        assert_eq!(settings.bot, BotKind::Random);
        assert_eq!(settings.field_width, 4);
    }
}

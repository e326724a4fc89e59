use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{Validate, YamlFile};

/// Loads a validated config once and caches it; falls back to `Default`
/// when the file does not exist yet.
pub struct ConfigManager<TConfig>
where
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
{
    file: YamlFile,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<TConfig>
where
    TConfig: Clone + DeserializeOwned + Serialize + Validate + Default,
{
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: YamlFile::new(path),
            config: Mutex::new(None),
        }
    }

    pub fn file(&self) -> &YamlFile {
        &self.file
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config) = self.file.read::<TConfig>()? else {
            return Ok(TConfig::default());
        };

        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        self.file.write(config)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::yaml_file::temp_yaml_path;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Limits {
        max_depth: u32,
    }

    impl Default for Limits {
        fn default() -> Self {
            Self { max_depth: 4 }
        }
    }

    impl Validate for Limits {
        fn validate(&self) -> Result<(), String> {
            if self.max_depth == 0 {
                return Err("max_depth must be positive".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_missing_file_returns_default() {
        let manager: ConfigManager<Limits> = ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config(), Ok(Limits::default()));
    }

    #[test]
    fn test_set_then_get_config() {
        let path = temp_yaml_path("config_manager");
        let manager: ConfigManager<Limits> = ConfigManager::from_yaml_file(path.clone());
        let config = Limits { max_depth: 7 };

        assert!(manager.set_config(&config).is_ok());
        assert_eq!(manager.get_config(), Ok(config.clone()));

        let fresh: ConfigManager<Limits> = ConfigManager::from_yaml_file(path.clone());
        assert_eq!(fresh.get_config(), Ok(config));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = temp_yaml_path("config_manager_invalid");
        let manager: ConfigManager<Limits> = ConfigManager::from_yaml_file(path.clone());

        assert!(manager.set_config(&Limits { max_depth: 0 }).is_err());
        assert!(!path.exists());

        std::fs::write(&path, "max_depth: 0\n").unwrap();
        let error = manager.get_config().unwrap_err();
        assert!(error.starts_with("Config validation error"));

        let _ = std::fs::remove_file(path);
    }
}

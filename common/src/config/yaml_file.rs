use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A YAML document on disk. A missing file reads as `None`.
#[derive(Debug, Clone)]
pub struct YamlFile {
    path: PathBuf,
}

impl YamlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(format!("Failed to read {}: {}", self.path.display(), err));
            }
        };

        from_yaml(&content).map(Some)
    }

    pub fn write<T: Serialize>(&self, value: &T) -> Result<(), String> {
        let content = to_yaml(value)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, String> {
    serde_yaml_ng::to_string(value).map_err(|e| format!("Failed to serialize YAML: {}", e))
}

pub fn from_yaml<T: DeserializeOwned>(content: &str) -> Result<T, String> {
    serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize YAML: {}", e))
}

#[cfg(test)]
pub(crate) fn temp_yaml_path(name: &str) -> PathBuf {
    let random_number: u32 = rand::random();
    std::env::temp_dir().join(format!("mini_games_{}_{}.yaml", name, random_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        values: Vec<u32>,
    }

    #[test]
    fn test_missing_file_reads_as_none() {
        let file = YamlFile::new("this_file_does_not_exist.yaml");
        let result: Result<Option<Sample>, String> = file.read();
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_write_then_read() {
        let file = YamlFile::new(temp_yaml_path("yaml_file"));
        let sample = Sample {
            name: "board".to_string(),
            values: vec![0, 4, 8],
        };

        assert!(file.write(&sample).is_ok());
        let loaded: Option<Sample> = file.read().unwrap();
        assert_eq!(loaded, Some(sample));

        let _ = std::fs::remove_file(file.path());
    }

    #[test]
    fn test_malformed_content_is_an_error() {
        let file = YamlFile::new(temp_yaml_path("malformed"));
        std::fs::write(file.path(), "name: [unterminated").unwrap();

        let result: Result<Option<Sample>, String> = file.read();
        assert!(result.is_err());

        let _ = std::fs::remove_file(file.path());
    }
}

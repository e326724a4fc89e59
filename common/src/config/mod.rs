mod config_manager;
pub(crate) mod yaml_file;

pub use config_manager::ConfigManager;
pub use yaml_file::{YamlFile, from_yaml, to_yaml};

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

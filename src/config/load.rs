use std::fs;
use std::path::PathBuf;

use super::error::ConfigError;
use super::types::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "llm-compare.toml";

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    pub config_exists: bool,
}

/// Reads the TOML config.
///
/// Without an override a missing `llm-compare.toml` yields the defaults; an
/// explicit path must exist.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let explicit = path_override.is_some();
    let path = path_override.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(LoadedConfig {
            config: toml::from_str(&contents)?,
            path,
            config_exists: true,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(LoadedConfig {
            config: AppConfig::default(),
            path,
            config_exists: false,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound(path)),
        Err(err) => Err(ConfigError::Io { path, source: err }),
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable overriding the data file location
pub const DATA_ENV: &str = "DAYPAD_DATA";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Config directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"))
        .join("daypad")
}

/// Default data file, respecting XDG_DATA_HOME
pub fn default_data_path() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("share"))
        .join("daypad")
        .join("store.json")
}

/// Read config.toml from `dir`. A missing file yields the defaults.
pub fn read_config_from(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

/// Pick the data file: explicit flag, then `$DAYPAD_DATA`, then `[store] path`
/// (relative to `config_dir`), then the XDG default.
pub fn resolve_data_path(flag: Option<&str>, config: &Config, config_dir: &Path) -> PathBuf {
    if let Some(p) = flag {
        return PathBuf::from(p);
    }
    if let Ok(p) = std::env::var(DATA_ENV)
        && !p.is_empty()
    {
        return PathBuf::from(p);
    }
    if let Some(p) = &config.store.path {
        let p = PathBuf::from(p);
        return if p.is_absolute() { p } else { config_dir.join(p) };
    }
    default_data_path()
}

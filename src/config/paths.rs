//! Filesystem locations for the target store.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Overrides the directory holding `config.json`.
pub const HOME_ENV: &str = "CFCTL_HOME";

const STORE_DIR: &str = ".cfctl";
const STORE_FILE: &str = "config.json";

/// Directory holding the target store: `$CFCTL_HOME` or `~/.cfctl`.
pub fn store_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(STORE_DIR))
        .ok_or(ConfigError::Home)
}

/// Path of the persisted target store file.
pub fn store_file() -> Result<PathBuf, ConfigError> {
    Ok(store_dir()?.join(STORE_FILE))
}

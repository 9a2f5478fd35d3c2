//! Configuration System
//!
//! Two stores live here. `Settings` controls how the client behaves (logging,
//! HTTP timeouts, color) and is layered from defaults, the global settings
//! file, an explicit `--config` file and `CFCTL__*` environment variables.
//! The target store (`store`) persists the session: API endpoint, token and
//! the targeted organization and space.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
pub mod paths;
mod sources;
pub mod store;
pub mod token;

pub use store::{ConfigRepository, Configuration, JsonConfigRepository};
pub use token::TokenInfo;

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Terminal output settings
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Settings {
    /// Validate settings values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "http.connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "http.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads `Settings` through the layered `config` builder.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings: defaults, then global file, then environment.
    pub fn load() -> Result<Settings, ConfigError> {
        Self::load_with(None)
    }

    /// Load settings with an explicit file layered over the global file.
    pub fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
        Self::load_with(Some(path))
    }

    fn load_with(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
        let mut builder = merge::merge_policy::builder_with_defaults()?;
        builder = sources::global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = sources::add_explicit_file(builder, path)?;
        }
        builder = sources::add_environment(builder);

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Path of the global settings file, if a home can be determined.
    pub fn global_config_path() -> Option<std::path::PathBuf> {
        sources::global_file::global_config_path()
    }
}

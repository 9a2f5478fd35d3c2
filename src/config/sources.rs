//! Settings sources layered on top of the merge policy defaults.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

pub mod global_file;

/// Prefix for settings overrides, e.g. `CFCTL__HTTP__REQUEST_TIMEOUT_SECS=30`.
pub const ENV_PREFIX: &str = "CFCTL";

/// Add an explicitly requested settings file. Unlike the global file it must exist.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, crate::error::ConfigError> {
    if !path.exists() {
        return Err(crate::error::ConfigError::Settings(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(true)))
}

/// Add `CFCTL__*` environment overrides.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}

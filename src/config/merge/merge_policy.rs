//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("http.connect_timeout_secs", 10i64)?
        .set_default("http.request_timeout_secs", 60i64)?
        .set_default("ui.color", true)?
        .set_default("logging.enabled", false)?
        .set_default("logging.level", "info")
}

//! cfctl CLI Binary
//!
//! Command-line client for a cloud application platform controller.

use cfctl::cli::{Cli, RunContext};
use cfctl::config::ConfigLoader;
use cfctl::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and settings file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("cfctl starting");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            eprintln!("Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    let context = match RunContext::new(cli.config.clone()) {
        Ok(ctx) => {
            info!("CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error initializing cfctl: {:#}", e);
            eprintln!("{}", cfctl::cli::map_error(&e));
            process::exit(1);
        }
    };

    let code = runtime.block_on(context.execute(&cli.args));
    info!(exit_code = code, "cfctl finished");
    process::exit(code);
}

/// Build logging configuration from CLI args, environment, and settings file.
/// Precedence: CLI flags, then `CFCTL_LOG*` environment, then settings file,
/// then defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    build_logging_config_with(cli, |name| std::env::var(name).ok())
}

fn build_logging_config_with<F>(cli: &Cli, env: F) -> LoggingConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load()
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };
    config.apply_env(env);

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

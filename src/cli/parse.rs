//! CLI parse: clap types for cfctl. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// cfctl - command line client for a cloud application platform
#[derive(Parser, Debug)]
#[command(name = "cfctl")]
#[command(about = "Command line client for a cloud application platform")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Settings file path (overrides default settings loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Command verb followed by its arguments and flags
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// The verb and everything after it, if a verb was given.
    pub fn verb(&self) -> Option<(&str, &[String])> {
        self.args
            .split_first()
            .map(|(verb, rest)| (verb.as_str(), rest))
    }
}

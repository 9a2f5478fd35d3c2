//! CLI domain: argument parsing, the run context and error mapping.
//! Verb dispatch goes through the command registry and the runner.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::RunContext;

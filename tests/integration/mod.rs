//! Integration tests for the cfctl platform client

mod cli_commands;
mod config_store;
mod push_flags;
mod repositories_http;
mod test_utils;

//! CLI output: setup errors rendered for the terminal.

/// Render a setup error with its cause chain on one line.
pub fn map_error(e: &anyhow::Error) -> String {
    format!("{:#}", e)
}

//! Terminal UI sink.
//!
//! Commands and the runner write user-facing output through `Ui`; nothing in
//! the dispatch pipeline prints directly.

use crate::command::CommandMetadata;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait Ui: Send + Sync {
    fn say(&self, message: &str);

    fn warn(&self, message: &str);

    /// Prompt for free text. Returns an empty string when no answer is available.
    fn ask(&self, prompt: &str) -> String;

    /// Yes/no prompt defaulting to no.
    fn confirm(&self, prompt: &str) -> bool;

    fn ok(&self);

    /// Write the failure banner and reason, and record the failure.
    fn failed(&self, message: &str);

    /// Write the failure banner, the usage complaint and the command's help.
    fn failed_with_usage(&self, metadata: &CommandMetadata, message: &str);

    /// First row is the header.
    fn display_table(&self, rows: &[Vec<String>]);

    fn has_failed(&self) -> bool;
}

/// `Ui` writing to stdout/stderr.
pub struct TerminalUi {
    color: bool,
    failed: AtomicBool,
}

impl TerminalUi {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            failed: AtomicBool::new(false),
        }
    }

    fn render_table(&self, rows: &[Vec<String>]) -> Option<Table> {
        let (header, body) = rows.split_first()?;
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::NOTHING);
        table.set_header(header.iter().map(|h| {
            let cell = Cell::new(h);
            if self.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));
        for row in body {
            table.add_row(row);
        }
        Some(table)
    }

    fn failed_banner(&self) -> String {
        if self.color {
            "FAILED".red().bold().to_string()
        } else {
            "FAILED".to_string()
        }
    }
}

impl Ui for TerminalUi {
    fn say(&self, message: &str) {
        println!("{}", message);
    }

    fn warn(&self, message: &str) {
        if self.color {
            println!("{}", message.magenta());
        } else {
            println!("{}", message);
        }
    }

    fn ask(&self, prompt: &str) -> String {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default()
    }

    fn confirm(&self, prompt: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }

    fn ok(&self) {
        if self.color {
            println!("{}", "OK".green().bold());
        } else {
            println!("OK");
        }
    }

    fn failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        println!("{}", self.failed_banner());
        println!("{}", message);
    }

    fn failed_with_usage(&self, metadata: &CommandMetadata, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        eprintln!("Incorrect Usage: {}", message);
        println!("{}", self.failed_banner());
        println!();
        println!("{}", metadata.help_text());
    }

    fn display_table(&self, rows: &[Vec<String>]) {
        if let Some(table) = self.render_table(rows) {
            println!("{}", table);
        }
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

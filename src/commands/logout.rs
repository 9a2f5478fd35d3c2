//! `logout`: drop the session token and the targeted org and space.

use crate::command::{Command, CommandMetadata, Context};
use crate::commands::{load_config, no_arguments};
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "logout",
    short_name: Some("lo"),
    description: "Log user out",
    usage: "cfctl logout",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct Logout {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
}

impl Logout {
    pub fn new(ui: Arc<dyn Ui>, config: Arc<dyn ConfigRepository>) -> Self {
        Self { ui, config }
    }
}

#[async_trait]
impl Command for Logout {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        no_arguments(ctx)?;
        Ok(Vec::new())
    }

    async fn run(&self, _ctx: &Context, _resolved: &Resolved) -> Result<(), CommandError> {
        self.ui.say("Logging out...");
        let mut configuration = load_config(self.config.as_ref())?;
        configuration.clear_session();
        self.config.save(&configuration)?;
        self.ui.ok();
        Ok(())
    }
}

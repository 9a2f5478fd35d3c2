//! `spaces`: list spaces in the targeted organization.

use crate::api::SpaceRepository;
use crate::command::{Command, CommandMetadata, Context};
use crate::commands::{load_config, no_arguments, table};
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "spaces",
    short_name: None,
    description: "List all spaces in an org",
    usage: "cfctl spaces",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct Spaces {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    spaces: Arc<dyn SpaceRepository>,
}

impl Spaces {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        spaces: Arc<dyn SpaceRepository>,
    ) -> Self {
        Self { ui, config, spaces }
    }
}

#[async_trait]
impl Command for Spaces {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        no_arguments(ctx)?;
        Ok(vec![Requirement::Login, Requirement::TargetedOrganization])
    }

    async fn run(&self, _ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let org = resolved.require_organization()?;
        let user = load_config(self.config.as_ref())?.user_name();
        self.ui
            .say(&format!("Getting spaces in org {} as {}...", org.name, user));

        let spaces = self.spaces.find_all(org).await?;
        self.ui.ok();

        if spaces.is_empty() {
            self.ui.say("No spaces found");
            return Ok(());
        }
        self.ui.display_table(&table(
            &["name"],
            spaces.into_iter().map(|space| vec![space.name]),
        ));
        Ok(())
    }
}

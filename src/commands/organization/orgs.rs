//! `orgs`: list organizations visible to the current user.

use crate::api::OrganizationRepository;
use crate::command::{Command, CommandMetadata, Context};
use crate::commands::{load_config, no_arguments, table};
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "orgs",
    short_name: Some("o"),
    description: "List all orgs",
    usage: "cfctl orgs",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct Orgs {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl Orgs {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        organizations: Arc<dyn OrganizationRepository>,
    ) -> Self {
        Self {
            ui,
            config,
            organizations,
        }
    }
}

#[async_trait]
impl Command for Orgs {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        no_arguments(ctx)?;
        Ok(vec![Requirement::Login])
    }

    async fn run(&self, _ctx: &Context, _resolved: &Resolved) -> Result<(), CommandError> {
        let user = load_config(self.config.as_ref())?.user_name();
        self.ui.say(&format!("Getting orgs as {}...", user));

        let organizations = self.organizations.find_all().await?;
        self.ui.ok();

        if organizations.is_empty() {
            self.ui.say("No orgs found");
            return Ok(());
        }
        self.ui.display_table(&table(
            &["name"],
            organizations.into_iter().map(|org| vec![org.name]),
        ));
        Ok(())
    }
}

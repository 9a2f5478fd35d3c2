//! `create-org`: create an organization.

use crate::api::OrganizationRepository;
use crate::command::{single_argument, Command, CommandMetadata, Context};
use crate::commands::load_config;
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "create-org",
    short_name: Some("co"),
    description: "Create an org",
    usage: "cfctl create-org ORG",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct CreateOrg {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    organizations: Arc<dyn OrganizationRepository>,
}

impl CreateOrg {
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
impl Command for CreateOrg {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        single_argument(ctx)?;
        Ok(vec![Requirement::Login])
    }

    async fn run(&self, ctx: &Context, _resolved: &Resolved) -> Result<(), CommandError> {
        let name = single_argument(ctx)?;
        let user = load_config(self.config.as_ref())?.user_name();
        self.ui
            .say(&format!("Creating org {} as {}...", name, user));

        // An existing org is a failure here, unlike create-space.
        self.organizations.create(name).await?;

        self.ui.ok();
        self.ui.say(&format!(
            "TIP: Use 'cfctl target -o {}' to target new org",
            name
        ));
        Ok(())
    }
}

//! `create-space`: create a space in the targeted organization.

use crate::api::SpaceRepository;
use crate::command::{single_argument, Command, CommandMetadata, Context};
use crate::commands::load_config;
use crate::config::ConfigRepository;
use crate::error::{ApiError, CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "create-space",
    short_name: None,
    description: "Create a space",
    usage: "cfctl create-space SPACE",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct CreateSpace {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    spaces: Arc<dyn SpaceRepository>,
}

impl CreateSpace {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        spaces: Arc<dyn SpaceRepository>,
    ) -> Self {
        Self { ui, config, spaces }
    }
}

#[async_trait]
impl Command for CreateSpace {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        single_argument(ctx)?;
        Ok(vec![Requirement::Login, Requirement::TargetedOrganization])
    }

    async fn run(&self, ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let name = single_argument(ctx)?;
        let org = resolved.require_organization()?;
        let user = load_config(self.config.as_ref())?.user_name();
        self.ui.say(&format!(
            "Creating space {} in org {} as {}...",
            name, org.name, user
        ));

        match self.spaces.create(org, name).await {
            Ok(_) => {
                self.ui.ok();
                self.ui.say(&format!(
                    "TIP: Use 'cfctl target -s {}' to target new space",
                    name
                ));
                Ok(())
            }
            Err(ApiError::AlreadyExists { .. }) => {
                debug!(space = name, "Space already exists");
                self.ui.ok();
                self.ui.warn(&format!("Space {} already exists", name));
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

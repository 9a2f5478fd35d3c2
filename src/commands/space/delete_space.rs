//! `delete-space`: delete a space and everything in it.

use crate::api::SpaceRepository;
use crate::command::{single_argument, Command, CommandMetadata, Context, FlagKind, FlagSpec};
use crate::commands::load_config;
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::model::Space;
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

static FLAGS: [FlagSpec; 1] = [FlagSpec::short(
    'f',
    "f",
    FlagKind::Bool,
    "Force deletion without confirmation",
)];

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "delete-space",
    short_name: None,
    description: "Delete a space",
    usage: "cfctl delete-space SPACE [-f]",
    flags: &FLAGS,
    exclusive: &[],
    together: &[],
};

pub struct DeleteSpace {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    spaces: Arc<dyn SpaceRepository>,
}

impl DeleteSpace {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        spaces: Arc<dyn SpaceRepository>,
    ) -> Self {
        Self { ui, config, spaces }
    }
}

#[async_trait]
impl Command for DeleteSpace {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        let name = single_argument(ctx)?;
        Ok(vec![
            Requirement::Login,
            Requirement::TargetedOrganization,
            Requirement::SpaceExists(name.to_string()),
        ])
    }

    async fn run(&self, ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let space = resolved.require_space()?;
        let org = resolved.require_organization()?;

        if !ctx.bool("f") {
            let prompt = format!(
                "Really delete space {} and everything associated with it?",
                space.name
            );
            if !self.ui.confirm(&prompt) {
                return Ok(());
            }
        }

        let mut configuration = load_config(self.config.as_ref())?;
        self.ui.say(&format!(
            "Deleting space {} in org {} as {}...",
            space.name,
            org.name,
            configuration.user_name()
        ));
        self.spaces.delete(space).await?;

        if configuration.space.guid == space.guid {
            configuration.space = Space::default();
            self.config.save(&configuration)?;
            info!(space = %space.name, "Deleted the targeted space");
        }
        self.ui.ok();
        Ok(())
    }
}

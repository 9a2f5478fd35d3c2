//! `target`: select an organization and/or space and show the current target.

use crate::api::{OrganizationRepository, SpaceRepository};
use crate::command::{Command, CommandMetadata, Context, FlagKind, FlagSpec};
use crate::commands::{load_config, no_arguments};
use crate::config::{ConfigRepository, Configuration};
use crate::error::{ApiError, CommandError, ConfigError, UsageError};
use crate::requirements::{Requirement, Resolved, NO_ORG_TARGETED, NO_SPACE_TARGETED};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

static FLAGS: [FlagSpec; 2] = [
    FlagSpec::short('o', "o", FlagKind::String, "Organization"),
    FlagSpec::short('s', "s", FlagKind::String, "Space"),
];

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "target",
    short_name: Some("t"),
    description: "Set or view the targeted org or space",
    usage: "cfctl target [-o ORG] [-s SPACE]",
    flags: &FLAGS,
    exclusive: &[],
    together: &[],
};

pub struct Target {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    spaces: Arc<dyn SpaceRepository>,
}

impl Target {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        spaces: Arc<dyn SpaceRepository>,
    ) -> Self {
        Self {
            ui,
            config,
            organizations,
            spaces,
        }
    }

    async fn target_organization(&self, name: &str) -> Result<(), CommandError> {
        let org = self
            .organizations
            .find_by_name(name)
            .await
            .map_err(|e| lookup_error("organization", name, e))?;
        let mut configuration = load_config(self.config.as_ref())?;
        configuration.set_organization(org);
        self.config.save(&configuration)?;
        info!(organization = name, "Organization targeted");
        Ok(())
    }

    async fn target_space(&self, name: &str) -> Result<(), CommandError> {
        let mut configuration = load_config(self.config.as_ref())?;
        if !configuration.has_organization() {
            return Err(ConfigError::NoOrganization.into());
        }
        let space = self
            .spaces
            .find_by_name(&configuration.organization, name)
            .await
            .map_err(|e| lookup_error("space", name, e))?;
        configuration.set_space(space)?;
        self.config.save(&configuration)?;
        info!(space = name, "Space targeted");
        Ok(())
    }

    fn show_target(&self, configuration: &Configuration) {
        self.ui.say(&format!(
            "API endpoint: {} (API version: {})",
            configuration.target, configuration.api_version
        ));
        self.ui
            .say(&format!("user:         {}", configuration.user_name()));
        if configuration.has_organization() {
            self.ui
                .say(&format!("org:          {}", configuration.organization.name));
        } else {
            self.ui.say(NO_ORG_TARGETED);
        }
        if configuration.has_space() {
            self.ui
                .say(&format!("space:        {}", configuration.space.name));
        } else {
            self.ui.say(NO_SPACE_TARGETED);
        }
    }
}

/// Not-found errors read as "<Kind> <name> not found"; anything else names the entity.
fn lookup_error(kind: &str, name: &str, err: ApiError) -> CommandError {
    match err {
        ApiError::NotFound { .. } => err.into(),
        other => CommandError::Message(format!("Could not target {} {}: {}", kind, name, other)),
    }
}

#[async_trait]
impl Command for Target {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        no_arguments(ctx)?;
        Ok(vec![Requirement::Login])
    }

    async fn run(&self, ctx: &Context, _resolved: &Resolved) -> Result<(), CommandError> {
        if let Some(org) = ctx.string("o") {
            self.target_organization(org).await?;
        }
        if let Some(space) = ctx.string("s") {
            self.target_space(space).await?;
        }
        let configuration = load_config(self.config.as_ref())?;
        self.show_target(&configuration);
        Ok(())
    }
}

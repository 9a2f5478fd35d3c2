//! `apps`: list applications in the targeted space.

use crate::api::ApplicationRepository;
use crate::command::{Command, CommandMetadata, Context};
use crate::commands::{load_config, no_arguments, table};
use crate::config::ConfigRepository;
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "apps",
    short_name: Some("a"),
    description: "List all apps in the target space",
    usage: "cfctl apps",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct Apps {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl Apps {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            ui,
            config,
            applications,
        }
    }
}

#[async_trait]
impl Command for Apps {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        no_arguments(ctx)?;
        Ok(vec![Requirement::Login, Requirement::TargetedSpace])
    }

    async fn run(&self, _ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let space = resolved.require_space()?;
        let configuration = load_config(self.config.as_ref())?;
        self.ui.say(&format!(
            "Getting apps in org {} / space {} as {}...",
            configuration.organization.name,
            space.name,
            configuration.user_name()
        ));

        let apps = self.applications.find_all(space).await?;
        self.ui.ok();

        if apps.is_empty() {
            self.ui.say("No apps found");
            return Ok(());
        }
        self.ui.display_table(&table(
            &["name", "state", "instances", "memory"],
            apps.into_iter().map(|app| {
                vec![
                    app.name,
                    app.state.to_lowercase(),
                    app.instances.to_string(),
                    format!("{}M", app.memory),
                ]
            }),
        ));
        Ok(())
    }
}

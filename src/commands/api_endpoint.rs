//! `api`: show or change the targeted controller endpoint.

use crate::api::EndpointRepository;
use crate::command::{Command, CommandMetadata, Context};
use crate::commands::load_config;
use crate::config::{ConfigRepository, Configuration};
use crate::error::{CommandError, UsageError};
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "api",
    short_name: None,
    description: "Set or view target api url",
    usage: "cfctl api [URL]",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct ApiEndpoint {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    endpoints: Arc<dyn EndpointRepository>,
}

impl ApiEndpoint {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        endpoints: Arc<dyn EndpointRepository>,
    ) -> Self {
        Self {
            ui,
            config,
            endpoints,
        }
    }

    fn show_endpoint(&self, configuration: &Configuration) {
        if configuration.target.is_empty() {
            self.ui
                .say("No api endpoint set. Use 'cfctl api URL' to set an endpoint.");
        } else {
            self.ui.say(&format!(
                "API endpoint: {} (API version: {})",
                configuration.target, configuration.api_version
            ));
        }
    }
}

#[async_trait]
impl Command for ApiEndpoint {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        if ctx.args().len() > 1 {
            return Err(UsageError::arity());
        }
        Ok(Vec::new())
    }

    async fn run(&self, ctx: &Context, _resolved: &Resolved) -> Result<(), CommandError> {
        let Some(url) = ctx.args().first() else {
            let configuration = load_config(self.config.as_ref())?;
            self.show_endpoint(&configuration);
            return Ok(());
        };

        self.ui.say(&format!("Setting api endpoint to {}...", url));
        let info = self.endpoints.get_info(url).await?;

        let mut configuration = load_config(self.config.as_ref())?;
        configuration.set_endpoint(url, &info);
        self.config.save(&configuration)?;
        info!(target_url = %configuration.target, "Endpoint changed");

        self.ui.ok();
        self.ui.say("");
        self.show_endpoint(&configuration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EndpointInfo, Organization};
    use crate::testhelpers::{
        run_command, FakeConfigRepository, FakeEndpointRepository, FakeRequirements, FakeUi,
    };

    #[tokio::test]
    async fn test_api_without_endpoint() {
        let ui = Arc::new(FakeUi::default());
        let config = Arc::new(FakeConfigRepository::default());
        let cmd = ApiEndpoint::new(
            ui.clone(),
            config,
            Arc::new(FakeEndpointRepository::default()),
        );

        let result = run_command(&cmd, &[], ui.clone(), &FakeRequirements::default()).await;

        assert!(result.requirements_passed);
        assert!(ui.outputs()[0].contains("No api endpoint set"));
    }

    #[tokio::test]
    async fn test_api_sets_endpoint_and_clears_session() {
        let ui = Arc::new(FakeUi::default());
        let config = Arc::new(FakeConfigRepository::default());
        config.login();
        config.update(|c| c.organization = Organization::new("my-org", "my-org-guid"));
        let endpoints = Arc::new(FakeEndpointRepository {
            info: EndpointInfo {
                api_version: "2.1.0".to_string(),
                authorization_endpoint: "https://login.example.com".to_string(),
            },
            ..Default::default()
        });
        let cmd = ApiEndpoint::new(ui.clone(), config.clone(), endpoints.clone());

        let result = run_command(
            &cmd,
            &["https://api.example.com/"],
            ui.clone(),
            &FakeRequirements::default(),
        )
        .await;

        assert_eq!(result.exit_code(), 0);
        assert_eq!(
            endpoints.requested_url().as_deref(),
            Some("https://api.example.com/")
        );
        let stored = config.current();
        assert_eq!(stored.target, "https://api.example.com");
        assert_eq!(stored.api_version, "2.1.0");
        assert!(stored.access_token.is_empty());
        assert!(!stored.has_organization());
        assert!(ui.contains_line(&["OK"]));
        assert!(ui.contains_line(&["https://api.example.com", "2.1.0"]));
    }

    #[tokio::test]
    async fn test_api_probe_failure_keeps_previous_endpoint() {
        let ui = Arc::new(FakeUi::default());
        let config = Arc::new(FakeConfigRepository::with(Configuration {
            target: "https://api.old.example.com".to_string(),
            ..Default::default()
        }));
        let endpoints = Arc::new(FakeEndpointRepository {
            get_info_err: true,
            ..Default::default()
        });
        let cmd = ApiEndpoint::new(ui.clone(), config.clone(), endpoints);

        let result = run_command(
            &cmd,
            &["https://api.new.example.com"],
            ui.clone(),
            &FakeRequirements::default(),
        )
        .await;

        assert_eq!(result.exit_code(), 1);
        assert_eq!(config.current().target, "https://api.old.example.com");
        assert!(ui.contains_line(&["FAILED"]));
    }
}

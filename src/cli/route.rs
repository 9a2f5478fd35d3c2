//! CLI route: run context wiring the UI, target store, repositories and runner.

use crate::api::RepositoryLocator;
use crate::config::{ConfigLoader, ConfigRepository, JsonConfigRepository, Settings};
use crate::net::CloudControllerGateway;
use crate::registry::CommandRegistry;
use crate::requirements::{CloudRequirements, RequirementEvaluator};
use crate::runner::Runner;
use crate::terminal::{TerminalUi, Ui};
use anyhow::Context as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for one CLI invocation.
pub struct RunContext {
    ui: Arc<dyn Ui>,
    registry: CommandRegistry,
    runner: Runner,
    requirements: Box<dyn RequirementEvaluator>,
}

impl RunContext {
    /// Build from an optional settings file path, the default target store and
    /// a terminal UI.
    pub fn new(config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let settings = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
        .context("Failed to load settings")?;

        let store: Arc<dyn ConfigRepository> = Arc::new(
            JsonConfigRepository::from_default_location()
                .context("Failed to locate target store")?,
        );
        // Corrupt stores fail startup.
        store.load().context("Failed to read target store")?;
        let ui: Arc<dyn Ui> = Arc::new(TerminalUi::new(settings.ui.color));
        Self::with_parts(&settings, ui, store)
    }

    /// Build from explicit collaborators; repositories talk to the controller.
    pub fn with_parts(
        settings: &Settings,
        ui: Arc<dyn Ui>,
        store: Arc<dyn ConfigRepository>,
    ) -> anyhow::Result<Self> {
        let gateway = Arc::new(
            CloudControllerGateway::new(Arc::clone(&store), &settings.http)
                .context("Failed to create controller client")?,
        );
        let repositories = RepositoryLocator::cloud(gateway);
        Ok(Self::from_locator(ui, store, repositories))
    }

    pub fn from_locator(
        ui: Arc<dyn Ui>,
        store: Arc<dyn ConfigRepository>,
        repositories: RepositoryLocator,
    ) -> Self {
        let requirements = Box::new(CloudRequirements::new(
            Arc::clone(&store),
            repositories.clone(),
        ));
        let registry = CommandRegistry::new(Arc::clone(&ui), store, repositories);
        let runner = Runner::new(Arc::clone(&ui));
        Self {
            ui,
            registry,
            runner,
            requirements,
        }
    }

    /// Execute `verb` with its arguments; returns the process exit code.
    pub async fn execute(&self, args: &[String]) -> i32 {
        let Some((verb, rest)) = args.split_first() else {
            self.ui.say(&CommandRegistry::app_help());
            return 0;
        };

        if verb == "help" || verb == "h" {
            return self.help(rest.first().map(String::as_str));
        }

        let command = match self.registry.lookup(verb) {
            Ok(command) => command,
            Err(usage) => {
                debug!(verb = %verb, "Unknown command");
                self.ui.failed(&usage.message);
                return 1;
            }
        };

        info!(command = command.metadata().name, "Running command");
        let result = self
            .runner
            .run_args(command.as_ref(), rest, self.requirements.as_ref())
            .await;
        info!(
            command = command.metadata().name,
            requirements_passed = result.requirements_passed,
            outcome = ?result.outcome,
            "Command finished"
        );
        result.exit_code()
    }

    fn help(&self, verb: Option<&str>) -> i32 {
        match verb {
            None => {
                self.ui.say(&CommandRegistry::app_help());
                0
            }
            Some(verb) => match CommandRegistry::command_help(verb) {
                Ok(help) => {
                    self.ui.say(&help);
                    0
                }
                Err(usage) => {
                    self.ui.failed(&usage.message);
                    1
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::model::Organization;
    use crate::requirements::Requirement;
    use crate::runner::RunOutcome;
    use crate::testhelpers::{
        new_context, FakeConfigRepository, FakeOrgRepository, FakeRequirements, FakeUi,
        RepositoryFakes,
    };

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_no_verb_prints_help() {
        let ui = Arc::new(FakeUi::default());
        let ctx = RunContext::from_locator(
            ui.clone(),
            Arc::new(FakeConfigRepository::default()),
            RepositoryFakes::default().locator(),
        );
        assert_eq!(ctx.execute(&[]).await, 0);
        assert!(ui.outputs()[0].contains("COMMANDS:"));
    }

    #[tokio::test]
    async fn test_unknown_verb_fails() {
        let ui = Arc::new(FakeUi::default());
        let ctx = RunContext::from_locator(
            ui.clone(),
            Arc::new(FakeConfigRepository::default()),
            RepositoryFakes::default().locator(),
        );
        assert_eq!(ctx.execute(&args(&["frobnicate"])).await, 1);
        assert_eq!(
            ui.outputs(),
            vec![
                "FAILED",
                "'frobnicate' is not a registered command. See 'cfctl help'"
            ]
        );
    }

    #[tokio::test]
    async fn test_help_for_verb() {
        let ui = Arc::new(FakeUi::default());
        let ctx = RunContext::from_locator(
            ui.clone(),
            Arc::new(FakeConfigRepository::default()),
            RepositoryFakes::default().locator(),
        );
        assert_eq!(ctx.execute(&args(&["help", "create-space"])).await, 0);
        assert!(ui.outputs()[0].contains("cfctl create-space SPACE"));
    }

    #[tokio::test]
    async fn test_target_then_show_round_trip() {
        let ui = Arc::new(FakeUi::default());
        let store = Arc::new(FakeConfigRepository::default());
        store.login();
        let fakes = RepositoryFakes {
            organizations: Arc::new(FakeOrgRepository {
                organizations: vec![Organization::new("my-org", "my-org-guid")],
                ..Default::default()
            }),
            ..Default::default()
        };
        let ctx = RunContext::from_locator(ui.clone(), store.clone(), fakes.locator());

        assert_eq!(ctx.execute(&args(&["t", "-o", "my-org"])).await, 0);
        assert_eq!(store.current().organization.guid, "my-org-guid");
        assert!(ui.contains_line(&["org:", "my-org"]));
    }

    #[tokio::test]
    async fn test_requirement_failure_exit_code() {
        let ui = Arc::new(FakeUi::default());
        let ctx = RunContext::from_locator(
            ui.clone(),
            Arc::new(FakeConfigRepository::default()),
            RepositoryFakes::default().locator(),
        );
        assert_eq!(ctx.execute(&args(&["apps"])).await, 1);
        assert_eq!(ui.outputs(), vec!["FAILED", "Not logged in."]);
    }

    fn lookup(verb: &str) -> Box<dyn Command> {
        CommandRegistry::new(
            Arc::new(FakeUi::default()),
            Arc::new(FakeConfigRepository::default()),
            RepositoryFakes::default().locator(),
        )
        .lookup(verb)
        .unwrap()
    }

    /// True when the verb rejects an invocation without positional arguments.
    fn needs_argument(verb: &str) -> bool {
        lookup(verb).requirements(&new_context(verb, &[])).is_err()
    }

    fn assert_untouched(fakes: &RepositoryFakes, verb: &str) {
        assert_eq!(fakes.endpoints.requested_url(), None, "{}", verb);
        assert_eq!(fakes.organizations.find_by_name_name(), None, "{}", verb);
        assert_eq!(fakes.organizations.create_name(), None, "{}", verb);
        assert_eq!(fakes.spaces.find_by_name_name(), None, "{}", verb);
        assert_eq!(fakes.spaces.create_space_name(), None, "{}", verb);
        assert_eq!(fakes.spaces.deleted_space(), None, "{}", verb);
        assert_eq!(fakes.applications.find_by_name_name(), None, "{}", verb);
        assert_eq!(fakes.applications.created(), None, "{}", verb);
        assert_eq!(fakes.applications.started(), None, "{}", verb);
        assert_eq!(fakes.app_events.requested_app(), None, "{}", verb);
    }

    #[tokio::test]
    async fn test_every_login_gated_verb_stops_before_repositories() {
        let mut gated = Vec::new();
        for metadata in CommandRegistry::all_metadata() {
            let verb = metadata.name;
            let verb_args: &[&str] = if needs_argument(verb) {
                &["my-thing"]
            } else {
                &[]
            };
            let requirements = lookup(verb)
                .requirements(&new_context(verb, verb_args))
                .unwrap();
            if !requirements.contains(&Requirement::Login) {
                continue;
            }
            assert_eq!(requirements[0], Requirement::Login, "{}", verb);
            gated.push(verb);

            let ui = Arc::new(FakeUi::default());
            let fakes = RepositoryFakes::default();
            let ctx = RunContext::from_locator(
                ui.clone(),
                Arc::new(FakeConfigRepository::default()),
                fakes.locator(),
            );
            let mut line = vec![verb];
            line.extend_from_slice(verb_args);

            assert_eq!(ctx.execute(&args(&line)).await, 1, "{}", verb);
            assert_eq!(ui.outputs(), vec!["FAILED", "Not logged in."], "{}", verb);
            assert_untouched(&fakes, verb);
        }
        assert_eq!(gated.len(), 9, "login-gated verbs: {:?}", gated);
    }

    #[tokio::test]
    async fn test_missing_argument_is_usage_failure_for_every_verb() {
        let mut checked = Vec::new();
        for metadata in CommandRegistry::all_metadata() {
            if !needs_argument(metadata.name) {
                continue;
            }
            checked.push(metadata.name);

            let ui = Arc::new(FakeUi::default());
            let requirements = FakeRequirements::passing();
            let result = Runner::new(ui.clone())
                .run_args(lookup(metadata.name).as_ref(), &[], &requirements)
                .await;

            assert_eq!(result.outcome, RunOutcome::UsageFailed, "{}", metadata.name);
            assert!(!result.requirements_passed, "{}", metadata.name);
            assert_eq!(result.exit_code(), 1);
            assert!(ui.failed_with_usage_called(), "{}", metadata.name);
            assert!(requirements.evaluated().is_empty(), "{}", metadata.name);
            assert_eq!(requirements.organization_name(), None);
            assert_eq!(requirements.application_name(), None);
        }
        assert_eq!(
            checked,
            vec!["create-org", "create-space", "delete-space", "events", "push"]
        );
    }
}

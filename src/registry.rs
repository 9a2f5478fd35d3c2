//! Command registry: verb lookup and help rendering.

use crate::api::RepositoryLocator;
use crate::command::{Command, CommandMetadata};
use crate::commands::{
    self, ApiEndpoint, Apps, CreateOrg, CreateSpace, DeleteSpace, Events, Logout, Orgs, Push,
    Spaces, Target,
};
use crate::config::ConfigRepository;
use crate::error::UsageError;
use crate::terminal::Ui;
use std::sync::Arc;

static ALL_METADATA: [&CommandMetadata; 11] = [
    &commands::api_endpoint::METADATA,
    &commands::logout::METADATA,
    &commands::target::METADATA,
    &commands::organization::orgs::METADATA,
    &commands::organization::create_org::METADATA,
    &commands::space::spaces::METADATA,
    &commands::space::create_space::METADATA,
    &commands::space::delete_space::METADATA,
    &commands::application::apps::METADATA,
    &commands::application::events::METADATA,
    &commands::application::push::METADATA,
];

pub struct CommandRegistry {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    repositories: RepositoryLocator,
}

impl CommandRegistry {
    pub fn new(
        ui: Arc<dyn Ui>,
        config: Arc<dyn ConfigRepository>,
        repositories: RepositoryLocator,
    ) -> Self {
        Self {
            ui,
            config,
            repositories,
        }
    }

    pub fn all_metadata() -> &'static [&'static CommandMetadata] {
        &ALL_METADATA
    }

    /// Metadata for a verb or its short name.
    pub fn metadata(verb: &str) -> Option<&'static CommandMetadata> {
        ALL_METADATA.iter().copied().find(|m| m.matches(verb))
    }

    pub fn lookup(&self, verb: &str) -> Result<Box<dyn Command>, UsageError> {
        let metadata = Self::metadata(verb).ok_or_else(|| unknown_command(verb))?;
        let ui = Arc::clone(&self.ui);
        let config = Arc::clone(&self.config);
        let repos = &self.repositories;

        let command: Box<dyn Command> = match metadata.name {
            "api" => Box::new(ApiEndpoint::new(ui, config, repos.endpoints.clone())),
            "logout" => Box::new(Logout::new(ui, config)),
            "target" => Box::new(Target::new(
                ui,
                config,
                repos.organizations.clone(),
                repos.spaces.clone(),
            )),
            "orgs" => Box::new(Orgs::new(ui, config, repos.organizations.clone())),
            "create-org" => Box::new(CreateOrg::new(ui, config, repos.organizations.clone())),
            "spaces" => Box::new(Spaces::new(ui, config, repos.spaces.clone())),
            "create-space" => Box::new(CreateSpace::new(ui, config, repos.spaces.clone())),
            "delete-space" => Box::new(DeleteSpace::new(ui, config, repos.spaces.clone())),
            "apps" => Box::new(Apps::new(ui, config, repos.applications.clone())),
            "events" => Box::new(Events::new(ui, repos.app_events.clone())),
            "push" => Box::new(Push::new(ui, config, repos.applications.clone())),
            _ => return Err(unknown_command(verb)),
        };
        Ok(command)
    }

    /// Overview of every command.
    pub fn app_help() -> String {
        let width = ALL_METADATA
            .iter()
            .map(|m| verb_label(m).len())
            .max()
            .unwrap_or(0);
        let mut out = String::from(
            "NAME:\n   cfctl - A command line tool to interact with a cloud application platform\n\n",
        );
        out.push_str("USAGE:\n   cfctl [global options] command [arguments...] [command options]\n\n");
        out.push_str("COMMANDS:\n");
        for metadata in ALL_METADATA.iter() {
            out.push_str(&format!(
                "   {:<width$}  {}\n",
                verb_label(metadata),
                metadata.description,
                width = width
            ));
        }
        out.push_str("\nRun 'cfctl help COMMAND' for details on a command.");
        out
    }

    /// Help for one verb, or the overview when the verb is unknown.
    pub fn command_help(verb: &str) -> Result<String, UsageError> {
        Self::metadata(verb)
            .map(CommandMetadata::help_text)
            .ok_or_else(|| unknown_command(verb))
    }
}

fn verb_label(metadata: &CommandMetadata) -> String {
    match metadata.short_name {
        Some(short) => format!("{}, {}", metadata.name, short),
        None => metadata.name.to_string(),
    }
}

fn unknown_command(verb: &str) -> UsageError {
    UsageError::new(format!(
        "'{}' is not a registered command. See 'cfctl help'",
        verb
    ))
}

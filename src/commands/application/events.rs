//! `events`: recent crash events for an application.

use crate::api::AppEventsRepository;
use crate::command::{single_argument, Command, CommandMetadata, Context};
use crate::commands::table;
use crate::error::{CommandError, UsageError};
use crate::model::Event;
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

/// Event timestamps are shown in local time with millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "events",
    short_name: None,
    description: "Show recent app events",
    usage: "cfctl events APP",
    flags: &[],
    exclusive: &[],
    together: &[],
};

pub struct Events {
    ui: Arc<dyn Ui>,
    events: Arc<dyn AppEventsRepository>,
}

impl Events {
    pub fn new(ui: Arc<dyn Ui>, events: Arc<dyn AppEventsRepository>) -> Self {
        Self { ui, events }
    }
}

fn event_row(event: &Event) -> Vec<String> {
    vec![
        event
            .timestamp
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        event.instance_index.to_string(),
        event.exit_description.clone(),
        event.exit_status.to_string(),
    ]
}

#[async_trait]
impl Command for Events {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        let name = single_argument(ctx)?;
        Ok(vec![
            Requirement::Login,
            Requirement::TargetedSpace,
            Requirement::ApplicationExists(name.to_string()),
        ])
    }

    async fn run(&self, _ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let app = resolved.require_application()?;
        self.ui
            .say(&format!("Getting events for app {}...", app.name));

        let events = self.events.list_events(app).await?;
        self.ui.ok();

        if events.is_empty() {
            self.ui
                .say(&format!("There are no events for app {}.", app.name));
            return Ok(());
        }
        self.ui.display_table(&table(
            &["time", "instance", "description", "exit status"],
            events.iter().map(event_row),
        ));
        Ok(())
    }
}

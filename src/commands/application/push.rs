//! `push`: create or update an application record and start it.
//!
//! Uploading application bits and mapping routes are not performed; the
//! related flags are still accepted and validated.

use crate::api::ApplicationRepository;
use crate::command::{single_argument, Command, CommandMetadata, Context, FlagKind, FlagSpec};
use crate::commands::load_config;
use crate::config::ConfigRepository;
use crate::error::{ApiError, CommandError, UsageError};
use crate::model::AppParams;
use crate::requirements::{Requirement, Resolved};
use crate::terminal::Ui;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

static FLAGS: [FlagSpec; 10] = [
    FlagSpec::short('b', "b", FlagKind::String, "Custom buildpack by name or Git URL"),
    FlagSpec::short('c', "c", FlagKind::String, "Startup command"),
    FlagSpec::long_short(
        "docker-image",
        'o',
        FlagKind::String,
        "Docker image to use (e.g. user/docker-image-name)",
    ),
    FlagSpec::long(
        "docker-username",
        FlagKind::String,
        "Repository username; used with password from environment variable CFCTL_DOCKER_PASSWORD",
    ),
    FlagSpec::short('i', "i", FlagKind::String, "Number of instances"),
    FlagSpec::short('m', "m", FlagKind::String, "Memory limit (e.g. 256M, 1024M, 1G)"),
    FlagSpec::short('p', "p", FlagKind::String, "Path to app directory or to a zip file"),
    FlagSpec::long("no-hostname", FlagKind::Bool, "Map the root domain to this app"),
    FlagSpec::long("no-route", FlagKind::Bool, "Do not map a route to this app"),
    FlagSpec::long("no-start", FlagKind::Bool, "Do not start an app after pushing"),
];

pub static METADATA: CommandMetadata = CommandMetadata {
    name: "push",
    short_name: Some("p"),
    description: "Push a new app or sync changes to an existing app",
    usage: "cfctl push APP_NAME [-b BUILDPACK] [-c COMMAND] [-i NUM_INSTANCES] [-m MEMORY] \
            [-p PATH] [--no-hostname] [--no-route] [--no-start]\n   \
            cfctl push APP_NAME --docker-image [REGISTRY_HOST:PORT/]IMAGE[:TAG] \
            [--docker-username USERNAME] [-c COMMAND] [-i NUM_INSTANCES] [-m MEMORY]",
    flags: &FLAGS,
    exclusive: &[
        &["docker-image", "p"],
        &["b", "docker-image"],
        &["no-hostname", "no-route"],
    ],
    together: &[("docker-username", "docker-image")],
};

/// Memory limit in megabytes from `512`, `512M`, `512MB`, `1G` or `1GB`.
fn parse_memory(value: &str) -> Option<u64> {
    let upper = value.trim().to_uppercase();
    let (digits, factor) = if let Some(d) = upper
        .strip_suffix("GB")
        .or_else(|| upper.strip_suffix('G'))
    {
        (d, 1024)
    } else if let Some(d) = upper
        .strip_suffix("MB")
        .or_else(|| upper.strip_suffix('M'))
    {
        (d, 1)
    } else {
        (upper.as_str(), 1)
    };
    digits
        .parse::<u64>()
        .ok()
        .filter(|m| *m > 0)
        .and_then(|m| m.checked_mul(factor))
}

/// Application attributes from the command line.
fn app_params(ctx: &Context) -> Result<AppParams, UsageError> {
    let name = single_argument(ctx)?;
    let instances = ctx
        .string("i")
        .map(|v| {
            v.parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| UsageError::new(format!("Invalid instance count: {}", v)))
        })
        .transpose()?;
    let memory = ctx
        .string("m")
        .map(|v| {
            parse_memory(v).ok_or_else(|| UsageError::new(format!("Invalid memory limit: {}", v)))
        })
        .transpose()?;

    Ok(AppParams {
        name: name.to_string(),
        buildpack: ctx.string("b").map(str::to_string),
        command: ctx.string("c").map(str::to_string),
        docker_image: ctx.string("docker-image").map(str::to_string),
        docker_username: ctx.string("docker-username").map(str::to_string),
        instances,
        memory,
    })
}

pub struct Push {
    ui: Arc<dyn Ui>,
    config: Arc<dyn ConfigRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl Push {
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
impl Command for Push {
    fn metadata(&self) -> &'static CommandMetadata {
        &METADATA
    }

    fn requirements(&self, ctx: &Context) -> Result<Vec<Requirement>, UsageError> {
        app_params(ctx)?;
        Ok(vec![Requirement::Login, Requirement::TargetedSpace])
    }

    async fn run(&self, ctx: &Context, resolved: &Resolved) -> Result<(), CommandError> {
        let params = app_params(ctx)?;
        let space = resolved.require_space()?;
        let configuration = load_config(self.config.as_ref())?;
        let location = format!(
            "in org {} / space {} as {}",
            configuration.organization.name,
            space.name,
            configuration.user_name()
        );

        let app = match self.applications.find_by_name(space, &params.name).await {
            Ok(existing) => {
                self.ui
                    .say(&format!("Updating app {} {}...", params.name, location));
                self.applications.update(&existing, &params).await?
            }
            Err(ApiError::NotFound { .. }) => {
                self.ui
                    .say(&format!("Creating app {} {}...", params.name, location));
                self.applications.create(space, &params).await?
            }
            Err(e) => return Err(e.into()),
        };
        self.ui.ok();

        if ctx.is_set("p") || ctx.bool("no-route") || ctx.bool("no-hostname") {
            debug!(app = %app.name, "Bits upload and route mapping are not performed");
        }

        if ctx.bool("no-start") {
            return Ok(());
        }
        self.ui.say("");
        self.ui.say(&format!("Starting app {} {}...", app.name, location));
        self.applications.start(&app).await?;
        self.ui.ok();
        Ok(())
    }
}

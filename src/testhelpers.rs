//! In-memory fakes for the UI, the target store and the repositories.
//!
//! Each fake is built with literal canned responses and boolean switches for
//! the not-found and error paths, and records the arguments it was called
//! with so tests can assert on them.

use crate::api::{
    AppEventsRepository, ApplicationRepository, EndpointRepository, OrganizationRepository,
    RepositoryLocator, SpaceRepository,
};
use crate::command::{Command, CommandMetadata, Context};
use crate::config::store::{ConfigRepository, Configuration};
use crate::config::token;
use crate::error::{ApiError, ConfigError, RequirementFailure};
use crate::model::{AppParams, Application, EndpointInfo, Event, Organization, Space};
use crate::registry::CommandRegistry;
use crate::requirements::{
    Requirement, RequirementEvaluator, Resolution, Resolved, NOT_LOGGED_IN, NO_ORG_TARGETED,
    NO_SPACE_TARGETED,
};
use crate::runner::{RunResult, Runner};
use crate::terminal::Ui;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Records every line written; answers prompts from a queue.
#[derive(Default)]
pub struct FakeUi {
    outputs: Mutex<Vec<String>>,
    inputs: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    failed: Mutex<bool>,
    failed_with_usage: Mutex<bool>,
}

impl FakeUi {
    pub fn with_inputs(inputs: &[&str]) -> Self {
        let ui = Self::default();
        ui.inputs
            .lock()
            .extend(inputs.iter().map(|s| s.to_string()));
        ui
    }

    pub fn outputs(&self) -> Vec<String> {
        self.outputs.lock().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn failed_with_usage_called(&self) -> bool {
        *self.failed_with_usage.lock()
    }

    /// True when any output line contains every fragment.
    pub fn contains_line(&self, fragments: &[&str]) -> bool {
        self.outputs
            .lock()
            .iter()
            .any(|line| fragments.iter().all(|f| line.contains(f)))
    }

    fn push(&self, line: impl Into<String>) {
        self.outputs.lock().push(line.into());
    }

    fn next_input(&self, prompt: &str) -> String {
        self.prompts.lock().push(prompt.to_string());
        self.inputs.lock().pop_front().unwrap_or_default()
    }
}

impl Ui for FakeUi {
    fn say(&self, message: &str) {
        self.push(message);
    }

    fn warn(&self, message: &str) {
        self.push(message);
    }

    fn ask(&self, prompt: &str) -> String {
        self.next_input(prompt)
    }

    fn confirm(&self, prompt: &str) -> bool {
        let answer = self.next_input(prompt).to_lowercase();
        answer == "y" || answer == "yes"
    }

    fn ok(&self) {
        self.push("OK");
    }

    fn failed(&self, message: &str) {
        *self.failed.lock() = true;
        self.push("FAILED");
        self.push(message);
    }

    fn failed_with_usage(&self, _metadata: &CommandMetadata, message: &str) {
        *self.failed.lock() = true;
        *self.failed_with_usage.lock() = true;
        self.push("FAILED");
        self.push(format!("Incorrect Usage: {}", message));
    }

    fn display_table(&self, rows: &[Vec<String>]) {
        for row in rows {
            self.push(row.join("  "));
        }
    }

    fn has_failed(&self) -> bool {
        *self.failed.lock()
    }
}

/// Target store held in memory.
#[derive(Default)]
pub struct FakeConfigRepository {
    configuration: Mutex<Option<Configuration>>,
}

impl FakeConfigRepository {
    pub fn with(configuration: Configuration) -> Self {
        Self {
            configuration: Mutex::new(Some(configuration)),
        }
    }

    /// Store a token for `my-user` that expires far in the future.
    pub fn login(&self) {
        self.update(|c| c.access_token = logged_in_token());
    }

    pub fn update(&self, change: impl FnOnce(&mut Configuration)) {
        let mut guard = self.configuration.lock();
        let configuration = guard.get_or_insert_with(Configuration::default);
        change(configuration);
    }

    pub fn current(&self) -> Configuration {
        self.configuration.lock().clone().unwrap_or_default()
    }
}

impl ConfigRepository for FakeConfigRepository {
    fn load(&self) -> Result<Configuration, ConfigError> {
        Ok(self.current())
    }

    fn save(&self, configuration: &Configuration) -> Result<(), ConfigError> {
        *self.configuration.lock() = Some(configuration.clone());
        Ok(())
    }

    fn delete(&self) -> Result<(), ConfigError> {
        *self.configuration.lock() = None;
        Ok(())
    }
}

/// Access token for `my-user`, valid until 2100.
pub fn logged_in_token() -> String {
    let expires = Utc
        .with_ymd_and_hms(2100, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    token::encode_unsigned("my-user", expires)
}

#[derive(Default)]
pub struct FakeEndpointRepository {
    pub info: EndpointInfo,
    pub get_info_err: bool,
    pub requested_url: Mutex<Option<String>>,
}

impl FakeEndpointRepository {
    pub fn requested_url(&self) -> Option<String> {
        self.requested_url.lock().clone()
    }
}

#[async_trait]
impl EndpointRepository for FakeEndpointRepository {
    async fn get_info(&self, url: &str) -> Result<EndpointInfo, ApiError> {
        *self.requested_url.lock() = Some(url.to_string());
        if self.get_info_err {
            return Err(ApiError::Transport("Error fetching endpoint info.".to_string()));
        }
        Ok(self.info.clone())
    }
}

#[derive(Default)]
pub struct FakeOrgRepository {
    pub organizations: Vec<Organization>,
    pub find_by_name_organization: Option<Organization>,
    pub find_by_name_err: bool,
    pub find_by_name_not_found: bool,
    pub create_err: bool,
    pub create_exists: bool,
    pub find_by_name_name: Mutex<Option<String>>,
    pub create_name: Mutex<Option<String>>,
}

impl FakeOrgRepository {
    pub fn find_by_name_name(&self) -> Option<String> {
        self.find_by_name_name.lock().clone()
    }

    pub fn create_name(&self) -> Option<String> {
        self.create_name.lock().clone()
    }
}

#[async_trait]
impl OrganizationRepository for FakeOrgRepository {
    async fn find_all(&self) -> Result<Vec<Organization>, ApiError> {
        Ok(self.organizations.clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Organization, ApiError> {
        *self.find_by_name_name.lock() = Some(name.to_string());
        if self.find_by_name_err {
            return Err(ApiError::Transport(
                "Error finding organization by name.".to_string(),
            ));
        }
        if self.find_by_name_not_found {
            return Err(ApiError::not_found("Organization", name));
        }
        self.find_by_name_organization
            .clone()
            .or_else(|| self.organizations.iter().find(|o| o.name == name).cloned())
            .ok_or_else(|| ApiError::not_found("Organization", name))
    }

    async fn create(&self, name: &str) -> Result<Organization, ApiError> {
        *self.create_name.lock() = Some(name.to_string());
        if self.create_exists {
            return Err(ApiError::already_exists("Organization", name));
        }
        if self.create_err {
            return Err(ApiError::Transport("Error creating organization.".to_string()));
        }
        Ok(Organization::new(name, format!("{}-guid", name)))
    }
}

#[derive(Default)]
pub struct FakeSpaceRepository {
    pub spaces: Vec<Space>,
    pub find_by_name_space: Option<Space>,
    pub find_by_name_err: bool,
    pub find_by_name_not_found: bool,
    pub create_space_exists: bool,
    pub create_space_err: bool,
    pub delete_err: bool,
    pub find_by_name_name: Mutex<Option<String>>,
    pub find_by_name_organization: Mutex<Option<Organization>>,
    pub create_space_name: Mutex<Option<String>>,
    pub deleted_space: Mutex<Option<Space>>,
}

impl FakeSpaceRepository {
    pub fn find_by_name_name(&self) -> Option<String> {
        self.find_by_name_name.lock().clone()
    }

    pub fn find_by_name_organization(&self) -> Option<Organization> {
        self.find_by_name_organization.lock().clone()
    }

    pub fn create_space_name(&self) -> Option<String> {
        self.create_space_name.lock().clone()
    }

    pub fn deleted_space(&self) -> Option<Space> {
        self.deleted_space.lock().clone()
    }
}

#[async_trait]
impl SpaceRepository for FakeSpaceRepository {
    async fn find_all(&self, _organization: &Organization) -> Result<Vec<Space>, ApiError> {
        Ok(self.spaces.clone())
    }

    async fn find_by_name(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Space, ApiError> {
        *self.find_by_name_name.lock() = Some(name.to_string());
        *self.find_by_name_organization.lock() = Some(organization.clone());
        if self.find_by_name_err {
            return Err(ApiError::Transport("Error finding space by name.".to_string()));
        }
        if self.find_by_name_not_found {
            return Err(ApiError::not_found("Space", name));
        }
        self.find_by_name_space
            .clone()
            .or_else(|| self.spaces.iter().find(|s| s.name == name).cloned())
            .ok_or_else(|| ApiError::not_found("Space", name))
    }

    async fn create(&self, _organization: &Organization, name: &str) -> Result<Space, ApiError> {
        *self.create_space_name.lock() = Some(name.to_string());
        if self.create_space_exists {
            return Err(ApiError::already_exists("Space", name));
        }
        if self.create_space_err {
            return Err(ApiError::Transport("Error creating space.".to_string()));
        }
        Ok(Space::new(name, format!("{}-guid", name)))
    }

    async fn delete(&self, space: &Space) -> Result<(), ApiError> {
        if self.delete_err {
            return Err(ApiError::Transport("Error deleting space.".to_string()));
        }
        *self.deleted_space.lock() = Some(space.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeApplicationRepository {
    pub applications: Vec<Application>,
    pub find_by_name_app: Option<Application>,
    pub find_by_name_err: bool,
    pub find_by_name_not_found: bool,
    pub create_err: bool,
    pub start_err: bool,
    pub find_by_name_name: Mutex<Option<String>>,
    pub created: Mutex<Option<AppParams>>,
    pub updated: Mutex<Option<(Application, AppParams)>>,
    pub started: Mutex<Option<Application>>,
}

impl FakeApplicationRepository {
    pub fn find_by_name_name(&self) -> Option<String> {
        self.find_by_name_name.lock().clone()
    }

    pub fn created(&self) -> Option<AppParams> {
        self.created.lock().clone()
    }

    pub fn updated(&self) -> Option<(Application, AppParams)> {
        self.updated.lock().clone()
    }

    pub fn started(&self) -> Option<Application> {
        self.started.lock().clone()
    }
}

#[async_trait]
impl ApplicationRepository for FakeApplicationRepository {
    async fn find_all(&self, _space: &Space) -> Result<Vec<Application>, ApiError> {
        Ok(self.applications.clone())
    }

    async fn find_by_name(&self, _space: &Space, name: &str) -> Result<Application, ApiError> {
        *self.find_by_name_name.lock() = Some(name.to_string());
        if self.find_by_name_err {
            return Err(ApiError::Transport("Error finding app by name.".to_string()));
        }
        if self.find_by_name_not_found {
            return Err(ApiError::not_found("App", name));
        }
        self.find_by_name_app
            .clone()
            .or_else(|| self.applications.iter().find(|a| a.name == name).cloned())
            .ok_or_else(|| ApiError::not_found("App", name))
    }

    async fn create(&self, _space: &Space, params: &AppParams) -> Result<Application, ApiError> {
        *self.created.lock() = Some(params.clone());
        if self.create_err {
            return Err(ApiError::Transport("Error creating app.".to_string()));
        }
        Ok(Application::new(
            params.name.clone(),
            format!("{}-guid", params.name),
        ))
    }

    async fn update(
        &self,
        application: &Application,
        params: &AppParams,
    ) -> Result<Application, ApiError> {
        *self.updated.lock() = Some((application.clone(), params.clone()));
        Ok(application.clone())
    }

    async fn start(&self, application: &Application) -> Result<Application, ApiError> {
        if self.start_err {
            return Err(ApiError::Transport("Error starting app.".to_string()));
        }
        *self.started.lock() = Some(application.clone());
        Ok(Application {
            state: "STARTED".to_string(),
            ..application.clone()
        })
    }
}

#[derive(Default)]
pub struct FakeAppEventsRepository {
    pub events: Vec<Event>,
    pub list_err: bool,
    pub requested_app: Mutex<Option<Application>>,
}

impl FakeAppEventsRepository {
    pub fn requested_app(&self) -> Option<Application> {
        self.requested_app.lock().clone()
    }
}

#[async_trait]
impl AppEventsRepository for FakeAppEventsRepository {
    async fn list_events(&self, application: &Application) -> Result<Vec<Event>, ApiError> {
        *self.requested_app.lock() = Some(application.clone());
        if self.list_err {
            return Err(ApiError::Transport("Error listing events.".to_string()));
        }
        Ok(self.events.clone())
    }
}

/// One fake per repository kind, kept typed so tests can inspect them.
#[derive(Clone, Default)]
pub struct RepositoryFakes {
    pub endpoints: Arc<FakeEndpointRepository>,
    pub organizations: Arc<FakeOrgRepository>,
    pub spaces: Arc<FakeSpaceRepository>,
    pub applications: Arc<FakeApplicationRepository>,
    pub app_events: Arc<FakeAppEventsRepository>,
}

impl RepositoryFakes {
    pub fn locator(&self) -> RepositoryLocator {
        RepositoryLocator {
            endpoints: self.endpoints.clone(),
            organizations: self.organizations.clone(),
            spaces: self.spaces.clone(),
            applications: self.applications.clone(),
            app_events: self.app_events.clone(),
        }
    }
}

/// Requirement evaluator driven by success switches.
///
/// Existence requirements always pass and resolve the canned entity; the
/// requested names are recorded.
pub struct FakeRequirements {
    pub login_success: bool,
    pub targeted_org_success: bool,
    pub targeted_space_success: bool,
    pub organization: Organization,
    pub space: Space,
    pub application: Application,
    pub organization_name: Mutex<Option<String>>,
    pub space_name: Mutex<Option<String>>,
    pub application_name: Mutex<Option<String>>,
    pub evaluated: Mutex<Vec<Requirement>>,
}

impl Default for FakeRequirements {
    fn default() -> Self {
        Self {
            login_success: false,
            targeted_org_success: false,
            targeted_space_success: false,
            organization: Organization::default(),
            space: Space::default(),
            application: Application::default(),
            organization_name: Mutex::new(None),
            space_name: Mutex::new(None),
            application_name: Mutex::new(None),
            evaluated: Mutex::new(Vec::new()),
        }
    }
}

impl FakeRequirements {
    /// Every requirement passes.
    pub fn passing() -> Self {
        Self {
            login_success: true,
            targeted_org_success: true,
            targeted_space_success: true,
            organization: Organization::new("my-org", "my-org-guid"),
            space: Space::new("my-space", "my-space-guid"),
            application: Application::new("my-app", "my-app-guid"),
            ..Default::default()
        }
    }

    pub fn organization_name(&self) -> Option<String> {
        self.organization_name.lock().clone()
    }

    pub fn space_name(&self) -> Option<String> {
        self.space_name.lock().clone()
    }

    pub fn application_name(&self) -> Option<String> {
        self.application_name.lock().clone()
    }

    pub fn evaluated(&self) -> Vec<Requirement> {
        self.evaluated.lock().clone()
    }
}

#[async_trait]
impl RequirementEvaluator for FakeRequirements {
    async fn evaluate(
        &self,
        requirement: &Requirement,
        _resolved: &Resolved,
    ) -> Result<Resolution, RequirementFailure> {
        self.evaluated.lock().push(requirement.clone());
        match requirement {
            Requirement::Login if self.login_success => Ok(Resolution::Nothing),
            Requirement::Login => Err(RequirementFailure::new(NOT_LOGGED_IN)),
            Requirement::TargetedOrganization if self.targeted_org_success => {
                Ok(Resolution::Organization(self.organization.clone()))
            }
            Requirement::TargetedOrganization => Err(RequirementFailure::new(NO_ORG_TARGETED)),
            Requirement::TargetedSpace if self.targeted_space_success => {
                Ok(Resolution::Space(self.space.clone()))
            }
            Requirement::TargetedSpace => Err(RequirementFailure::new(NO_SPACE_TARGETED)),
            Requirement::OrganizationExists(name) => {
                *self.organization_name.lock() = Some(name.clone());
                Ok(Resolution::Organization(self.organization.clone()))
            }
            Requirement::SpaceExists(name) => {
                *self.space_name.lock() = Some(name.clone());
                Ok(Resolution::Space(self.space.clone()))
            }
            Requirement::ApplicationExists(name) => {
                *self.application_name.lock() = Some(name.clone());
                Ok(Resolution::Application(self.application.clone()))
            }
        }
    }
}

/// Parse `args` for the registered verb `name`.
///
/// Panics when the verb is unknown or the arguments do not parse; tests
/// exercising parse failures go through `Runner::run_args` instead.
pub fn new_context(name: &str, args: &[&str]) -> Context {
    let metadata = CommandRegistry::metadata(name)
        .unwrap_or_else(|| panic!("no command named {}", name));
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    Context::parse(metadata, &args).unwrap_or_else(|e| panic!("{}", e))
}

/// Run a command with the given raw arguments through a fresh `Runner`.
pub async fn run_command(
    command: &dyn Command,
    args: &[&str],
    ui: Arc<FakeUi>,
    requirements: &FakeRequirements,
) -> RunResult {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    Runner::new(ui).run_args(command, &args, requirements).await
}

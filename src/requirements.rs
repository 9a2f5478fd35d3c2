//! Requirements: preconditions evaluated before a command body runs.
//!
//! A `Requirement` is plain data. Evaluation happens through a
//! `RequirementEvaluator`, which reads the target store and repositories and
//! may resolve an entity that the command body later reads from `Resolved`.
//! Evaluation never changes target state.

use crate::api::RepositoryLocator;
use crate::config::ConfigRepository;
use crate::error::{CommandError, RequirementFailure};
use crate::model::{Application, Organization, Space};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub mod factory;

pub use factory::{RequirementFactory, RequirementsError};

pub const NOT_LOGGED_IN: &str = "Not logged in.";
pub const NO_ORG_TARGETED: &str = "No org targeted, use 'cfctl target -o ORG' to target an org.";
pub const NO_SPACE_TARGETED: &str =
    "No space targeted, use 'cfctl target -s SPACE' to target a space.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    Login,
    TargetedOrganization,
    TargetedSpace,
    OrganizationExists(String),
    SpaceExists(String),
    ApplicationExists(String),
}

impl Requirement {
    /// Needs a repository call to evaluate.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Requirement::OrganizationExists(_)
                | Requirement::SpaceExists(_)
                | Requirement::ApplicationExists(_)
        )
    }

    /// Resolves an organization for requirements evaluated after it.
    pub fn provides_organization(&self) -> bool {
        matches!(
            self,
            Requirement::TargetedOrganization | Requirement::OrganizationExists(_)
        )
    }

    /// Resolves a space for requirements evaluated after it.
    pub fn provides_space(&self) -> bool {
        matches!(self, Requirement::TargetedSpace | Requirement::SpaceExists(_))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Login => write!(f, "login"),
            Requirement::TargetedOrganization => write!(f, "targeted organization"),
            Requirement::TargetedSpace => write!(f, "targeted space"),
            Requirement::OrganizationExists(name) => write!(f, "organization '{}' exists", name),
            Requirement::SpaceExists(name) => write!(f, "space '{}' exists", name),
            Requirement::ApplicationExists(name) => write!(f, "application '{}' exists", name),
        }
    }
}

/// What a successful evaluation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Nothing,
    Organization(Organization),
    Space(Space),
    Application(Application),
}

/// Entities resolved by the requirements of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub organization: Option<Organization>,
    pub space: Option<Space>,
    pub application: Option<Application>,
}

impl Resolved {
    pub fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Nothing => {}
            Resolution::Organization(org) => self.organization = Some(org),
            Resolution::Space(space) => self.space = Some(space),
            Resolution::Application(app) => self.application = Some(app),
        }
    }

    pub fn require_organization(&self) -> Result<&Organization, CommandError> {
        self.organization
            .as_ref()
            .ok_or_else(|| CommandError::Message(NO_ORG_TARGETED.to_string()))
    }

    pub fn require_space(&self) -> Result<&Space, CommandError> {
        self.space
            .as_ref()
            .ok_or_else(|| CommandError::Message(NO_SPACE_TARGETED.to_string()))
    }

    pub fn require_application(&self) -> Result<&Application, CommandError> {
        self.application
            .as_ref()
            .ok_or_else(|| CommandError::Message("No application resolved".to_string()))
    }
}

#[async_trait]
pub trait RequirementEvaluator: Send + Sync {
    /// Evaluate one requirement. `resolved` holds what earlier requirements
    /// of the same list produced.
    async fn evaluate(
        &self,
        requirement: &Requirement,
        resolved: &Resolved,
    ) -> Result<Resolution, RequirementFailure>;
}

/// Evaluator backed by the target store and the platform repositories.
pub struct CloudRequirements {
    config: Arc<dyn ConfigRepository>,
    repositories: RepositoryLocator,
}

impl CloudRequirements {
    pub fn new(config: Arc<dyn ConfigRepository>, repositories: RepositoryLocator) -> Self {
        Self {
            config,
            repositories,
        }
    }
}

#[async_trait]
impl RequirementEvaluator for CloudRequirements {
    async fn evaluate(
        &self,
        requirement: &Requirement,
        resolved: &Resolved,
    ) -> Result<Resolution, RequirementFailure> {
        debug!(requirement = %requirement, "Evaluating requirement");
        match requirement {
            Requirement::Login => {
                if self.config.load()?.is_logged_in() {
                    Ok(Resolution::Nothing)
                } else {
                    Err(RequirementFailure::new(NOT_LOGGED_IN))
                }
            }
            Requirement::TargetedOrganization => {
                let configuration = self.config.load()?;
                if configuration.has_organization() {
                    Ok(Resolution::Organization(configuration.organization))
                } else {
                    Err(RequirementFailure::new(NO_ORG_TARGETED))
                }
            }
            Requirement::TargetedSpace => {
                let configuration = self.config.load()?;
                if configuration.has_space() {
                    Ok(Resolution::Space(configuration.space))
                } else {
                    Err(RequirementFailure::new(NO_SPACE_TARGETED))
                }
            }
            Requirement::OrganizationExists(name) => {
                let org = self.repositories.organizations.find_by_name(name).await?;
                Ok(Resolution::Organization(org))
            }
            Requirement::SpaceExists(name) => {
                let org = resolved
                    .organization
                    .as_ref()
                    .ok_or_else(|| RequirementFailure::new(NO_ORG_TARGETED))?;
                let space = self.repositories.spaces.find_by_name(org, name).await?;
                Ok(Resolution::Space(space))
            }
            Requirement::ApplicationExists(name) => {
                let space = resolved
                    .space
                    .as_ref()
                    .ok_or_else(|| RequirementFailure::new(NO_SPACE_TARGETED))?;
                let app = self.repositories.applications.find_by_name(space, name).await?;
                Ok(Resolution::Application(app))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::testhelpers::{
        FakeConfigRepository, FakeOrgRepository, FakeSpaceRepository, RepositoryFakes,
    };

    fn evaluator(config: Arc<FakeConfigRepository>, fakes: &RepositoryFakes) -> CloudRequirements {
        CloudRequirements::new(config, fakes.locator())
    }

    #[tokio::test]
    async fn test_login_requirement() {
        let fakes = RepositoryFakes::default();
        let config = Arc::new(FakeConfigRepository::default());
        let reqs = evaluator(Arc::clone(&config), &fakes);

        let err = reqs
            .evaluate(&Requirement::Login, &Resolved::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, NOT_LOGGED_IN);

        config.login();
        assert_eq!(
            reqs.evaluate(&Requirement::Login, &Resolved::default())
                .await
                .unwrap(),
            Resolution::Nothing
        );
    }

    #[tokio::test]
    async fn test_targeted_org_and_space_resolve_from_store() {
        let fakes = RepositoryFakes::default();
        let config = Arc::new(FakeConfigRepository::with(Configuration {
            organization: Organization::new("my-org", "my-org-guid"),
            ..Default::default()
        }));
        let reqs = evaluator(Arc::clone(&config), &fakes);

        assert_eq!(
            reqs.evaluate(&Requirement::TargetedOrganization, &Resolved::default())
                .await
                .unwrap(),
            Resolution::Organization(Organization::new("my-org", "my-org-guid"))
        );
        let err = reqs
            .evaluate(&Requirement::TargetedSpace, &Resolved::default())
            .await
            .unwrap_err();
        assert!(err.message.contains("space"));
    }

    #[tokio::test]
    async fn test_space_exists_uses_resolved_org() {
        let fakes = RepositoryFakes {
            spaces: Arc::new(FakeSpaceRepository {
                find_by_name_space: Some(Space::new("my-space", "my-space-guid")),
                ..Default::default()
            }),
            ..Default::default()
        };
        let reqs = evaluator(Arc::new(FakeConfigRepository::default()), &fakes);
        let resolved = Resolved {
            organization: Some(Organization::new("my-org", "my-org-guid")),
            ..Default::default()
        };

        let resolution = reqs
            .evaluate(&Requirement::SpaceExists("my-space".to_string()), &resolved)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Space(Space::new("my-space", "my-space-guid")));
        assert_eq!(fakes.spaces.find_by_name_name().as_deref(), Some("my-space"));
    }

    #[tokio::test]
    async fn test_entity_not_found_and_transport_error() {
        let fakes = RepositoryFakes {
            organizations: Arc::new(FakeOrgRepository {
                find_by_name_not_found: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let reqs = evaluator(Arc::new(FakeConfigRepository::default()), &fakes);
        let err = reqs
            .evaluate(
                &Requirement::OrganizationExists("my-org".to_string()),
                &Resolved::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "Organization my-org not found");

        let failing = RepositoryFakes {
            organizations: Arc::new(FakeOrgRepository {
                find_by_name_err: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let reqs = evaluator(Arc::new(FakeConfigRepository::default()), &failing);
        let err = reqs
            .evaluate(
                &Requirement::OrganizationExists("my-org".to_string()),
                &Resolved::default(),
            )
            .await
            .unwrap_err();
        assert!(err.message.contains("Error finding organization by name."));
    }

    #[test]
    fn test_resolved_record() {
        let mut resolved = Resolved::default();
        resolved.record(Resolution::Nothing);
        assert_eq!(resolved, Resolved::default());
        resolved.record(Resolution::Application(Application::new("my-app", "my-app-guid")));
        assert_eq!(resolved.require_application().unwrap().name, "my-app");
        assert!(resolved.require_space().is_err());
    }
}

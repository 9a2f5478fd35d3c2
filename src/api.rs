//! Repository collaborators
//!
//! One typed client per platform resource kind. Requirements and commands
//! depend only on these traits; the cloud-controller implementations live in
//! the submodules and talk to the controller through `CloudControllerGateway`.

use crate::error::ApiError;
use crate::model::{AppParams, Application, EndpointInfo, Event, Organization, Space};
use crate::net::CloudControllerGateway;
use async_trait::async_trait;
use std::sync::Arc;

pub mod app_events;
pub mod applications;
pub mod endpoints;
pub mod organizations;
pub mod spaces;

pub use app_events::CloudControllerAppEventsRepository;
pub use applications::CloudControllerApplicationRepository;
pub use endpoints::CloudControllerEndpointRepository;
pub use organizations::CloudControllerOrganizationRepository;
pub use spaces::CloudControllerSpaceRepository;

#[async_trait]
pub trait EndpointRepository: Send + Sync {
    /// Probe a controller URL and return its advertised info.
    async fn get_info(&self, url: &str) -> Result<EndpointInfo, ApiError>;
}

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Organization>, ApiError>;

    /// Fails with `ApiError::NotFound` when no organization has that name.
    async fn find_by_name(&self, name: &str) -> Result<Organization, ApiError>;

    /// Fails with `ApiError::AlreadyExists` when the name is taken.
    async fn create(&self, name: &str) -> Result<Organization, ApiError>;
}

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_all(&self, organization: &Organization) -> Result<Vec<Space>, ApiError>;

    async fn find_by_name(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Space, ApiError>;

    async fn create(&self, organization: &Organization, name: &str) -> Result<Space, ApiError>;

    /// Delete a space and everything in it.
    async fn delete(&self, space: &Space) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn find_all(&self, space: &Space) -> Result<Vec<Application>, ApiError>;

    async fn find_by_name(&self, space: &Space, name: &str) -> Result<Application, ApiError>;

    async fn create(&self, space: &Space, params: &AppParams) -> Result<Application, ApiError>;

    async fn update(
        &self,
        application: &Application,
        params: &AppParams,
    ) -> Result<Application, ApiError>;

    async fn start(&self, application: &Application) -> Result<Application, ApiError>;
}

#[async_trait]
pub trait AppEventsRepository: Send + Sync {
    async fn list_events(&self, application: &Application) -> Result<Vec<Event>, ApiError>;
}

/// Bundle of repository collaborators handed to the registry and requirements.
#[derive(Clone)]
pub struct RepositoryLocator {
    pub endpoints: Arc<dyn EndpointRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub spaces: Arc<dyn SpaceRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub app_events: Arc<dyn AppEventsRepository>,
}

impl RepositoryLocator {
    /// Cloud-controller backed repositories sharing one gateway.
    pub fn cloud(gateway: Arc<CloudControllerGateway>) -> Self {
        Self {
            endpoints: Arc::new(CloudControllerEndpointRepository::new(Arc::clone(&gateway))),
            organizations: Arc::new(CloudControllerOrganizationRepository::new(Arc::clone(
                &gateway,
            ))),
            spaces: Arc::new(CloudControllerSpaceRepository::new(Arc::clone(&gateway))),
            applications: Arc::new(CloudControllerApplicationRepository::new(Arc::clone(
                &gateway,
            ))),
            app_events: Arc::new(CloudControllerAppEventsRepository::new(gateway)),
        }
    }
}

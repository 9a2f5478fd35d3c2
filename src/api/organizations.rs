//! Organization repository backed by `/v2/organizations`.

use crate::api::OrganizationRepository;
use crate::error::{ApiError, ORGANIZATION_NAME_TAKEN};
use crate::model::Organization;
use crate::net::{name_filter, CloudControllerGateway, Resource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
struct OrganizationEntity {
    name: String,
}

impl From<Resource<OrganizationEntity>> for Organization {
    fn from(resource: Resource<OrganizationEntity>) -> Self {
        Organization::new(resource.entity.name, resource.metadata.guid)
    }
}

pub struct CloudControllerOrganizationRepository {
    gateway: Arc<CloudControllerGateway>,
}

impl CloudControllerOrganizationRepository {
    pub fn new(gateway: Arc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl OrganizationRepository for CloudControllerOrganizationRepository {
    async fn find_all(&self) -> Result<Vec<Organization>, ApiError> {
        let resources = self
            .gateway
            .list_all::<OrganizationEntity>("/v2/organizations", &[])
            .await?;
        Ok(resources.into_iter().map(Organization::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Organization, ApiError> {
        self.gateway
            .find_first::<OrganizationEntity>("/v2/organizations", &name_filter(name))
            .await?
            .map(Organization::from)
            .ok_or_else(|| ApiError::not_found("Organization", name))
    }

    async fn create(&self, name: &str) -> Result<Organization, ApiError> {
        let result: Result<Resource<OrganizationEntity>, ApiError> = self
            .gateway
            .post("/v2/organizations", &json!({ "name": name }))
            .await;
        match result {
            Ok(resource) => Ok(resource.into()),
            Err(ApiError::Http { code, .. }) if code == ORGANIZATION_NAME_TAKEN => {
                Err(ApiError::already_exists("Organization", name))
            }
            Err(e) => Err(e),
        }
    }
}

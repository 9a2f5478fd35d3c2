//! Space repository backed by `/v2/spaces` and the org-scoped space lists.

use crate::api::SpaceRepository;
use crate::error::{ApiError, SPACE_NAME_TAKEN};
use crate::model::{Organization, Space};
use crate::net::{name_filter, CloudControllerGateway, Resource};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
struct SpaceEntity {
    name: String,
}

impl From<Resource<SpaceEntity>> for Space {
    fn from(resource: Resource<SpaceEntity>) -> Self {
        Space::new(resource.entity.name, resource.metadata.guid)
    }
}

pub struct CloudControllerSpaceRepository {
    gateway: Arc<CloudControllerGateway>,
}

impl CloudControllerSpaceRepository {
    pub fn new(gateway: Arc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

fn org_spaces_path(organization: &Organization) -> String {
    format!("/v2/organizations/{}/spaces", organization.guid)
}

#[async_trait]
impl SpaceRepository for CloudControllerSpaceRepository {
    async fn find_all(&self, organization: &Organization) -> Result<Vec<Space>, ApiError> {
        let resources = self
            .gateway
            .list_all::<SpaceEntity>(&org_spaces_path(organization), &[])
            .await?;
        Ok(resources.into_iter().map(Space::from).collect())
    }

    async fn find_by_name(
        &self,
        organization: &Organization,
        name: &str,
    ) -> Result<Space, ApiError> {
        self.gateway
            .find_first::<SpaceEntity>(&org_spaces_path(organization), &name_filter(name))
            .await?
            .map(Space::from)
            .ok_or_else(|| ApiError::not_found("Space", name))
    }

    async fn create(&self, organization: &Organization, name: &str) -> Result<Space, ApiError> {
        let body = json!({ "name": name, "organization_guid": organization.guid });
        let result: Result<Resource<SpaceEntity>, ApiError> =
            self.gateway.post("/v2/spaces", &body).await;
        match result {
            Ok(resource) => Ok(resource.into()),
            Err(ApiError::Http { code, .. }) if code == SPACE_NAME_TAKEN => {
                Err(ApiError::already_exists("Space", name))
            }
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, space: &Space) -> Result<(), ApiError> {
        self.gateway
            .delete(
                &format!("/v2/spaces/{}", space.guid),
                &[("recursive", "true".to_string())],
            )
            .await
    }
}

//! Application repository backed by `/v2/apps` and space-scoped app lists.

use crate::api::ApplicationRepository;
use crate::error::ApiError;
use crate::model::{AppParams, Application, Space};
use crate::net::{name_filter, CloudControllerGateway, Resource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
struct ApplicationEntity {
    name: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    instances: u32,
    #[serde(default)]
    memory: u64,
}

impl From<Resource<ApplicationEntity>> for Application {
    fn from(resource: Resource<ApplicationEntity>) -> Self {
        Application {
            name: resource.entity.name,
            guid: resource.metadata.guid,
            state: resource.entity.state,
            instances: resource.entity.instances,
            memory: resource.entity.memory,
        }
    }
}

/// Request body for create/update; unset attributes are left to the controller.
#[derive(Serialize)]
struct ApplicationRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    space_guid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    buildpack: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docker_image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docker_credentials: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<u64>,
}

impl<'a> ApplicationRequest<'a> {
    fn from_params(params: &'a AppParams, space_guid: Option<&'a str>) -> Self {
        Self {
            name: &params.name,
            space_guid,
            buildpack: params.buildpack.as_deref(),
            command: params.command.as_deref(),
            docker_image: params.docker_image.as_deref(),
            docker_credentials: params
                .docker_username
                .as_ref()
                .map(|username| json!({ "username": username })),
            instances: params.instances,
            memory: params.memory,
        }
    }
}

pub struct CloudControllerApplicationRepository {
    gateway: Arc<CloudControllerGateway>,
}

impl CloudControllerApplicationRepository {
    pub fn new(gateway: Arc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

fn space_apps_path(space: &Space) -> String {
    format!("/v2/spaces/{}/apps", space.guid)
}

#[async_trait]
impl ApplicationRepository for CloudControllerApplicationRepository {
    async fn find_all(&self, space: &Space) -> Result<Vec<Application>, ApiError> {
        let resources = self
            .gateway
            .list_all::<ApplicationEntity>(&space_apps_path(space), &[])
            .await?;
        Ok(resources.into_iter().map(Application::from).collect())
    }

    async fn find_by_name(&self, space: &Space, name: &str) -> Result<Application, ApiError> {
        self.gateway
            .find_first::<ApplicationEntity>(&space_apps_path(space), &name_filter(name))
            .await?
            .map(Application::from)
            .ok_or_else(|| ApiError::not_found("App", name))
    }

    async fn create(&self, space: &Space, params: &AppParams) -> Result<Application, ApiError> {
        let body = ApplicationRequest::from_params(params, Some(&space.guid));
        let resource: Resource<ApplicationEntity> = self.gateway.post("/v2/apps", &body).await?;
        Ok(resource.into())
    }

    async fn update(
        &self,
        application: &Application,
        params: &AppParams,
    ) -> Result<Application, ApiError> {
        let body = ApplicationRequest::from_params(params, None);
        let resource: Resource<ApplicationEntity> = self
            .gateway
            .put(&format!("/v2/apps/{}", application.guid), &body)
            .await?;
        Ok(resource.into())
    }

    async fn start(&self, application: &Application) -> Result<Application, ApiError> {
        let resource: Resource<ApplicationEntity> = self
            .gateway
            .put(
                &format!("/v2/apps/{}", application.guid),
                &json!({ "state": "STARTED" }),
            )
            .await?;
        Ok(resource.into())
    }
}

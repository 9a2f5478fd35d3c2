//! Controller endpoint probing (`/v2/info`).

use crate::api::EndpointRepository;
use crate::error::ApiError;
use crate::model::EndpointInfo;
use crate::net::CloudControllerGateway;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct InfoResponse {
    #[serde(default)]
    api_version: String,
    #[serde(default)]
    authorization_endpoint: String,
}

pub struct CloudControllerEndpointRepository {
    gateway: Arc<CloudControllerGateway>,
}

impl CloudControllerEndpointRepository {
    pub fn new(gateway: Arc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl EndpointRepository for CloudControllerEndpointRepository {
    async fn get_info(&self, url: &str) -> Result<EndpointInfo, ApiError> {
        let info_url = format!("{}/v2/info", url.trim_end_matches('/'));
        let info: InfoResponse = self.gateway.get_absolute(&info_url).await?;
        Ok(EndpointInfo {
            api_version: info.api_version,
            authorization_endpoint: info.authorization_endpoint,
        })
    }
}

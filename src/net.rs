//! Cloud controller HTTP gateway.
//!
//! Thin JSON transport over `reqwest`. The target URL and access token are
//! read from the target store on every request so that commands which change
//! the endpoint (`api`) are observed by later calls in the same process.

use crate::config::{ConfigRepository, HttpSettings};
use crate::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One page of a controller list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResources<E> {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

/// A controller resource: metadata plus entity body.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

/// Error body returned by the controller on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
struct ControllerErrorBody {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    description: String,
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::Transport(format!("Connection error: {}", error))
    } else if error.is_decode() {
        ApiError::Decode(error.to_string())
    } else {
        ApiError::Transport(error.to_string())
    }
}

pub struct CloudControllerGateway {
    client: Client,
    config: Arc<dyn ConfigRepository>,
}

impl CloudControllerGateway {
    pub fn new(config: Arc<dyn ConfigRepository>, http: &HttpSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .timeout(Duration::from_secs(http.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn session(&self) -> Result<(String, String), ApiError> {
        let configuration = self.config.load()?;
        if configuration.target.is_empty() {
            return Err(ApiError::NoEndpoint);
        }
        Ok((configuration.target, configuration.access_token))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let (target, token) = self.session()?;
        let url = format!("{}{}", target.trim_end_matches('/'), path);
        debug!(method = %method, url = %url, "Controller request");
        let mut builder = self
            .client
            .request(method, &url)
            .header("Accept", "application/json");
        if !token.is_empty() {
            builder = builder.header("Authorization", token);
        }
        Ok(builder)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(map_http_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Controller response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ControllerErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let description = if body.description.is_empty() {
            text
        } else {
            body.description
        };
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized(description));
        }
        Err(ApiError::Http {
            status: status.as_u16(),
            code: body.code,
            description,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET an absolute URL without credentials. Used to probe new endpoints.
    pub async fn get_absolute<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url = %url, "Controller probe");
        let builder = self.client.get(url).header("Accept", "application/json");
        Self::decode(Self::send(builder).await?).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path)?.query(query);
        Self::decode(Self::send(builder).await?).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        Self::decode(Self::send(builder).await?).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.request(Method::PUT, path)?.json(body);
        Self::decode(Self::send(builder).await?).await
    }

    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path)?.query(query);
        Self::send(builder).await?;
        Ok(())
    }

    /// Fetch every page of a list endpoint, following `next_url`.
    pub async fn list_all<E: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Resource<E>>, ApiError> {
        let mut page: PaginatedResources<E> = self.get(path, query).await?;
        let mut resources = std::mem::take(&mut page.resources);
        while let Some(next) = page.next_url.take() {
            page = self.get(&next, &[]).await?;
            resources.append(&mut page.resources);
        }
        Ok(resources)
    }

    /// First resource of a filtered list, if any.
    pub async fn find_first<E: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<Resource<E>>, ApiError> {
        let page: PaginatedResources<E> = self.get(path, query).await?;
        Ok(page.resources.into_iter().next())
    }
}

/// `q=name:<name>` filter used by the controller's find-by-name lookups.
pub fn name_filter(name: &str) -> [(&'static str, String); 1] {
    [("q", format!("name:{}", name))]
}

//! Target store: the persisted session (endpoint, token, targeted org and space).

use crate::config::token::TokenInfo;
use crate::error::ConfigError;
use crate::model::{EndpointInfo, Organization, Space};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Current target state.
///
/// A space can only be selected while an organization is selected, and
/// selecting an organization always clears the space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub target: String,
    pub api_version: String,
    pub authorization_endpoint: String,
    pub access_token: String,
    pub refresh_token: String,
    pub organization: Organization,
    pub space: Space,
}

impl Configuration {
    /// True when a non-empty, non-expired access token is present.
    pub fn is_logged_in(&self) -> bool {
        if self.access_token.trim().is_empty() {
            return false;
        }
        match TokenInfo::decode(&self.access_token) {
            Some(info) => !info.is_expired_at(Utc::now()),
            None => true,
        }
    }

    /// User name carried by the access token, empty when unknown.
    pub fn user_name(&self) -> String {
        TokenInfo::decode(&self.access_token)
            .and_then(|info| info.user_name)
            .unwrap_or_default()
    }

    pub fn has_organization(&self) -> bool {
        !self.organization.is_empty()
    }

    pub fn has_space(&self) -> bool {
        !self.space.is_empty()
    }

    /// Select an organization, clearing any selected space.
    pub fn set_organization(&mut self, organization: Organization) {
        self.organization = organization;
        self.space = Space::default();
    }

    /// Select a space within the current organization.
    pub fn set_space(&mut self, space: Space) -> Result<(), ConfigError> {
        if !self.has_organization() {
            return Err(ConfigError::NoOrganization);
        }
        self.space = space;
        Ok(())
    }

    /// Drop token and targeted org/space.
    pub fn clear_session(&mut self) {
        self.access_token.clear();
        self.refresh_token.clear();
        self.organization = Organization::default();
        self.space = Space::default();
    }

    /// Point at a new controller. Any previous session is meaningless there.
    pub fn set_endpoint(&mut self, url: &str, info: &EndpointInfo) {
        self.target = url.trim_end_matches('/').to_string();
        self.api_version = info.api_version.clone();
        self.authorization_endpoint = info.authorization_endpoint.clone();
        self.clear_session();
    }
}

/// Persistence port for the target store.
pub trait ConfigRepository: Send + Sync {
    /// Current configuration; a missing store yields the default.
    fn load(&self) -> Result<Configuration, ConfigError>;

    /// Persist the configuration.
    fn save(&self, configuration: &Configuration) -> Result<(), ConfigError>;

    /// Remove the persisted configuration.
    fn delete(&self) -> Result<(), ConfigError>;
}

/// JSON-file backed target store with an in-process cache.
pub struct JsonConfigRepository {
    path: PathBuf,
    cache: Mutex<Option<Configuration>>,
}

impl JsonConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    /// Repository at the default location (`$CFCTL_HOME` or `~/.cfctl`).
    pub fn from_default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(crate::config::paths::store_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_from_disk(&self) -> Result<Configuration, ConfigError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No target store on disk; using defaults");
            return Ok(Configuration::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Configuration::default());
        }
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Configuration, ConfigError> {
        let mut cache = self.cache.lock();
        if let Some(ref configuration) = *cache {
            return Ok(configuration.clone());
        }
        let configuration = self.read_from_disk()?;
        *cache = Some(configuration.clone());
        Ok(configuration)
    }

    fn save(&self, configuration: &Configuration) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(configuration).map_err(|e| ConfigError::Parse {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        // Write-then-rename keeps the store intact if we die mid-write.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        *self.cache.lock() = Some(configuration.clone());
        debug!(path = %self.path.display(), "Saved target store");
        Ok(())
    }

    fn delete(&self) -> Result<(), ConfigError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        *self.cache.lock() = None;
        Ok(())
    }
}

//! Platform entities shared by repositories, requirements and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub guid: String,
}

impl Organization {
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: guid.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.guid.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,
    pub guid: String,
}

impl Space {
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: guid.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.guid.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub guid: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub instances: u32,
    /// Memory limit in megabytes
    #[serde(default)]
    pub memory: u64,
}

impl Application {
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: guid.into(),
            ..Default::default()
        }
    }
}

/// Attributes sent when creating or updating an application record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppParams {
    pub name: String,
    pub buildpack: Option<String>,
    pub command: Option<String>,
    pub docker_image: Option<String>,
    pub docker_username: Option<String>,
    pub instances: Option<u32>,
    pub memory: Option<u64>,
}

/// One application lifecycle event (instance crash, restart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub guid: String,
    pub instance_index: u32,
    pub exit_status: i32,
    pub exit_description: String,
    pub timestamp: DateTime<Utc>,
}

/// Controller info advertised at `/v2/info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub api_version: String,
    pub authorization_endpoint: String,
}

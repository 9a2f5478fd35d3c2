//! Application event repository backed by `/v2/apps/:guid/events`.

use crate::api::AppEventsRepository;
use crate::error::ApiError;
use crate::model::{Application, Event};
use crate::net::{CloudControllerGateway, Resource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct EventEntity {
    instance_index: u32,
    exit_status: i32,
    #[serde(default)]
    exit_description: String,
    timestamp: DateTime<Utc>,
}

impl From<Resource<EventEntity>> for Event {
    fn from(resource: Resource<EventEntity>) -> Self {
        Event {
            guid: resource.metadata.guid,
            instance_index: resource.entity.instance_index,
            exit_status: resource.entity.exit_status,
            exit_description: resource.entity.exit_description,
            timestamp: resource.entity.timestamp,
        }
    }
}

pub struct CloudControllerAppEventsRepository {
    gateway: Arc<CloudControllerGateway>,
}

impl CloudControllerAppEventsRepository {
    pub fn new(gateway: Arc<CloudControllerGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AppEventsRepository for CloudControllerAppEventsRepository {
    async fn list_events(&self, application: &Application) -> Result<Vec<Event>, ApiError> {
        let resources = self
            .gateway
            .list_all::<EventEntity>(&format!("/v2/apps/{}/events", application.guid), &[])
            .await?;
        Ok(resources.into_iter().map(Event::from).collect())
    }
}

//! Cloud-controller repositories against a mock controller.

use cfctl::api::{
    AppEventsRepository, ApplicationRepository, EndpointRepository, OrganizationRepository,
    RepositoryLocator, SpaceRepository,
};
use cfctl::config::{Configuration, HttpSettings};
use cfctl::error::ApiError;
use cfctl::model::{AppParams, Application, Organization, Space};
use cfctl::net::CloudControllerGateway;
use cfctl::testhelpers::{logged_in_token, FakeConfigRepository};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn repositories_for(server: &MockServer) -> RepositoryLocator {
    let store = Arc::new(FakeConfigRepository::with(Configuration {
        target: server.base_url(),
        access_token: logged_in_token(),
        ..Default::default()
    }));
    let gateway = Arc::new(CloudControllerGateway::new(store, &HttpSettings::default()).unwrap());
    RepositoryLocator::cloud(gateway)
}

fn page(resources: Value) -> Value {
    json!({ "total_results": 1, "next_url": null, "resources": resources })
}

#[tokio::test]
async fn test_endpoint_info_is_probed_without_a_session() {
    let server = MockServer::start_async().await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/info");
            then.status(200).json_body(json!({
                "api_version": "2.0.0",
                "authorization_endpoint": "https://login.example.com"
            }));
        })
        .await;

    let store = Arc::new(FakeConfigRepository::default());
    let gateway = Arc::new(CloudControllerGateway::new(store, &HttpSettings::default()).unwrap());
    let repositories = RepositoryLocator::cloud(gateway);

    let result = repositories
        .endpoints
        .get_info(&format!("{}/", server.base_url()))
        .await
        .unwrap();

    info.assert_async().await;
    assert_eq!(result.api_version, "2.0.0");
    assert_eq!(result.authorization_endpoint, "https://login.example.com");
}

#[tokio::test]
async fn test_find_organization_by_name_uses_name_filter() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/organizations")
                .query_param("q", "name:my-org");
            then.status(200).json_body(page(json!([
                { "metadata": { "guid": "my-org-guid" }, "entity": { "name": "my-org" } }
            ])));
        })
        .await;

    let organization = repositories_for(&server)
        .organizations
        .find_by_name("my-org")
        .await
        .unwrap();

    lookup.assert_async().await;
    assert_eq!(organization, Organization::new("my-org", "my-org-guid"));
}

#[tokio::test]
async fn test_missing_organization_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/organizations");
            then.status(200).json_body(page(json!([])));
        })
        .await;

    let err = repositories_for(&server)
        .organizations
        .find_by_name("nope")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Organization nope not found");
}

#[tokio::test]
async fn test_taken_organization_name_is_already_exists() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/organizations");
            then.status(400).json_body(json!({
                "code": 30002,
                "description": "The organization name is taken: my-org"
            }));
        })
        .await;

    let err = repositories_for(&server)
        .organizations
        .create("my-org")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyExists { kind: "Organization", ref name } if name == "my-org"));
}

#[tokio::test]
async fn test_other_create_errors_pass_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/organizations");
            then.status(500).json_body(json!({
                "code": 10001,
                "description": "Something went wrong"
            }));
        })
        .await;

    let err = repositories_for(&server)
        .organizations
        .create("my-org")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, code: 10001, .. }));
}

#[tokio::test]
async fn test_spaces_are_listed_within_the_organization() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/organizations/my-org-guid/spaces");
            then.status(200).json_body(json!({
                "total_results": 2,
                "next_url": null,
                "resources": [
                    { "metadata": { "guid": "space1-guid" }, "entity": { "name": "space1" } },
                    { "metadata": { "guid": "space2-guid" }, "entity": { "name": "space2" } }
                ]
            }));
        })
        .await;

    let spaces = repositories_for(&server)
        .spaces
        .find_all(&Organization::new("my-org", "my-org-guid"))
        .await
        .unwrap();

    list.assert_async().await;
    let names: Vec<_> = spaces.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["space1", "space2"]);
}

#[tokio::test]
async fn test_taken_space_name_is_already_exists() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/spaces");
            then.status(400).json_body(json!({
                "code": 40002,
                "description": "The app space name is taken: my-space"
            }));
        })
        .await;

    let err = repositories_for(&server)
        .spaces
        .create(&Organization::new("my-org", "my-org-guid"), "my-space")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AlreadyExists { kind: "Space", .. }));
}

#[tokio::test]
async fn test_space_delete_is_recursive() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/v2/spaces/my-space-guid")
                .query_param("recursive", "true");
            then.status(204);
        })
        .await;

    repositories_for(&server)
        .spaces
        .delete(&Space::new("my-space", "my-space-guid"))
        .await
        .unwrap();

    delete.assert_async().await;
}

#[tokio::test]
async fn test_create_and_start_application() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/apps");
            then.status(201).json_body(json!({
                "metadata": { "guid": "my-app-guid" },
                "entity": { "name": "my-app", "state": "STOPPED", "instances": 2, "memory": 512 }
            }));
        })
        .await;
    let start = server
        .mock_async(|when, then| {
            when.method(PUT).path("/v2/apps/my-app-guid");
            then.status(201).json_body(json!({
                "metadata": { "guid": "my-app-guid" },
                "entity": { "name": "my-app", "state": "STARTED", "instances": 2, "memory": 512 }
            }));
        })
        .await;

    let repositories = repositories_for(&server);
    let params = AppParams {
        name: "my-app".to_string(),
        instances: Some(2),
        memory: Some(512),
        ..Default::default()
    };
    let created = repositories
        .applications
        .create(&Space::new("my-space", "my-space-guid"), &params)
        .await
        .unwrap();
    assert_eq!(created.state, "STOPPED");
    assert_eq!(created.memory, 512);

    let started = repositories.applications.start(&created).await.unwrap();

    create.assert_async().await;
    start.assert_async().await;
    assert_eq!(started.state, "STARTED");
    assert_eq!(started.instances, 2);
}

#[tokio::test]
async fn test_application_events_are_listed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/apps/my-app-guid/events");
            then.status(200).json_body(page(json!([
                {
                    "metadata": { "guid": "event-1" },
                    "entity": {
                        "instance_index": 98,
                        "exit_status": 78,
                        "exit_description": "app instance exited",
                        "timestamp": "2015-02-10T16:12:35Z"
                    }
                }
            ])));
        })
        .await;

    let events = repositories_for(&server)
        .app_events
        .list_events(&Application::new("my-app", "my-app-guid"))
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].instance_index, 98);
    assert_eq!(events[0].exit_status, 78);
    assert_eq!(events[0].exit_description, "app instance exited");
    assert_eq!(events[0].timestamp.to_rfc3339(), "2015-02-10T16:12:35+00:00");
}

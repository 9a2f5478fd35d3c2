//! End-to-end runs of the `cfctl` binary.

use super::test_utils::TestHome;
use cfctl::config::Configuration;
use cfctl::model::Organization;
use cfctl::testhelpers::logged_in_token;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;

fn logged_in_at(target: &str) -> Configuration {
    Configuration {
        target: target.to_string(),
        api_version: "2.0.0".to_string(),
        access_token: logged_in_token(),
        ..Default::default()
    }
}

#[test]
fn test_no_arguments_prints_help() {
    let home = TestHome::new();
    home.cfctl()
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS:"))
        .stdout(predicate::str::contains("create-space"));
}

#[test]
fn test_help_for_a_verb() {
    let home = TestHome::new();
    home.cfctl()
        .args(["help", "push"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cfctl push APP"))
        .stdout(predicate::str::contains("--docker-image, -o"));
}

#[test]
fn test_unknown_verb_fails() {
    let home = TestHome::new();
    home.cfctl()
        .arg("frobnicate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains(
            "'frobnicate' is not a registered command. See 'cfctl help'",
        ));
}

#[test]
fn test_orgs_requires_login() {
    let home = TestHome::new();
    home.cfctl()
        .arg("orgs")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_too_many_arguments_is_incorrect_usage() {
    let home = TestHome::new();
    home.cfctl()
        .args(["create-space", "one", "two"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incorrect Usage"))
        .stdout(predicate::str::contains("cfctl create-space SPACE"));
}

#[test]
fn test_api_sets_endpoint_and_clears_session() {
    let server = MockServer::start();
    let info = server.mock(|when, then| {
        when.method(GET).path("/v2/info");
        then.status(200).json_body(json!({
            "api_version": "2.0.0",
            "authorization_endpoint": "https://login.example.com"
        }));
    });

    let home = TestHome::new();
    let mut previous = logged_in_at("https://old.example.com");
    previous.set_organization(Organization::new("old-org", "old-org-guid"));
    home.write_store(&previous);

    home.cfctl()
        .args(["api", &server.base_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setting api endpoint to"))
        .stdout(predicate::str::contains("OK"));

    info.assert();
    let saved = home.read_store();
    assert_eq!(saved.target, server.base_url());
    assert_eq!(saved.api_version, "2.0.0");
    assert_eq!(saved.authorization_endpoint, "https://login.example.com");
    assert!(saved.access_token.is_empty());
    assert!(!saved.has_organization());
}

#[test]
fn test_target_organization_is_persisted() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/organizations")
            .query_param("q", "name:my-org");
        then.status(200).json_body(json!({
            "total_results": 1,
            "next_url": null,
            "resources": [
                { "metadata": { "guid": "my-org-guid" }, "entity": { "name": "my-org" } }
            ]
        }));
    });

    let home = TestHome::new();
    home.write_store(&logged_in_at(&server.base_url()));

    home.cfctl()
        .args(["target", "-o", "my-org"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user:         my-user"))
        .stdout(predicate::str::contains("org:          my-org"));

    lookup.assert();
    let saved = home.read_store();
    assert_eq!(saved.organization, Organization::new("my-org", "my-org-guid"));
    assert!(!saved.has_space());
}

#[test]
fn test_target_unknown_organization_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/organizations");
        then.status(200)
            .json_body(json!({ "total_results": 0, "next_url": null, "resources": [] }));
    });

    let home = TestHome::new();
    home.write_store(&logged_in_at(&server.base_url()));

    home.cfctl()
        .args(["target", "-o", "nope"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("nope"));

    assert!(!home.read_store().has_organization());
}

#[test]
fn test_logout_clears_session() {
    let home = TestHome::new();
    let mut configuration = logged_in_at("https://api.example.com");
    configuration.set_organization(Organization::new("my-org", "my-org-guid"));
    home.write_store(&configuration);

    home.cfctl()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));

    let saved = home.read_store();
    assert_eq!(saved.target, "https://api.example.com");
    assert!(saved.access_token.is_empty());
    assert!(!saved.has_organization());
}

#[test]
fn test_corrupt_target_store_fails_startup() {
    let home = TestHome::new();
    std::fs::create_dir_all(home.store_dir()).unwrap();
    std::fs::write(home.store_dir().join("config.json"), "{ not json").unwrap();

    home.cfctl()
        .arg("target")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read target store"));
}

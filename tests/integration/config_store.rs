//! Target store persistence through the JSON-file repository.

use super::test_utils::TestHome;
use cfctl::config::{ConfigRepository, Configuration, JsonConfigRepository};
use cfctl::model::{Organization, Space};
use cfctl::testhelpers::logged_in_token;

#[test]
fn test_missing_store_loads_defaults() {
    let home = TestHome::new();
    let configuration = home.store().load().unwrap();
    assert_eq!(configuration, Configuration::default());
    assert!(!configuration.is_logged_in());
}

#[test]
fn test_saved_target_survives_a_new_repository() {
    let home = TestHome::new();
    let mut configuration = Configuration {
        target: "https://api.example.com".to_string(),
        api_version: "2.0.0".to_string(),
        access_token: logged_in_token(),
        ..Default::default()
    };
    configuration.set_organization(Organization::new("my-org", "my-org-guid"));
    configuration
        .set_space(Space::new("my-space", "my-space-guid"))
        .unwrap();
    home.write_store(&configuration);

    let reloaded = home.read_store();
    assert_eq!(reloaded, configuration);
    assert!(reloaded.is_logged_in());
    assert_eq!(reloaded.user_name(), "my-user");
}

#[test]
fn test_corrupt_store_is_a_parse_error() {
    let home = TestHome::new();
    let repository = home.store();
    std::fs::create_dir_all(home.store_dir()).unwrap();
    std::fs::write(repository.path(), "{ not json").unwrap();

    let err = repository.load().unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_delete_removes_the_file() {
    let home = TestHome::new();
    home.write_store(&Configuration {
        target: "https://api.example.com".to_string(),
        ..Default::default()
    });

    let repository = JsonConfigRepository::new(home.store_dir().join("config.json"));
    assert!(repository.path().exists());
    repository.delete().unwrap();
    assert!(!repository.path().exists());
    assert_eq!(repository.load().unwrap(), Configuration::default());
}

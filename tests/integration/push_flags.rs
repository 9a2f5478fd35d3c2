//! Flag combination errors for `push` are reported before any requirement runs.

use super::test_utils::TestHome;
use predicates::prelude::*;

#[test]
fn test_docker_username_without_image_errors_with_usage() {
    let home = TestHome::new();
    home.cfctl()
        .args(["push", "--docker-username", "some-docker-username", "my-app"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Incorrect Usage: '--docker-image, -o' and '--docker-username' must be used together.",
        ))
        .stdout(predicate::str::contains("NAME:"))
        .stdout(predicate::str::contains(
            "Push a new app or sync changes to an existing app",
        ));
}

#[test]
fn test_path_and_docker_image_cannot_be_used_together() {
    let home = TestHome::new();
    let app_dir = home.dir.path().join("app");
    std::fs::create_dir_all(&app_dir).unwrap();

    home.cfctl()
        .args(["push", "my-app", "-o", "cloudfoundry/diego-docker-app", "-p"])
        .arg(&app_dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Incorrect Usage: The following arguments cannot be used together: --docker-image, -o, -p",
        ))
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_buildpack_and_docker_image_cannot_be_used_together() {
    let home = TestHome::new();
    home.cfctl()
        .args([
            "push",
            "my-app",
            "-o",
            "cloudfoundry/diego-docker-app",
            "-b",
            "some-buildpack",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Creating app").not())
        .stderr(predicate::str::contains(
            "Incorrect Usage: The following arguments cannot be used together: -b, --docker-image, -o",
        ))
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_no_hostname_and_no_route_cannot_be_used_together() {
    let home = TestHome::new();
    home.cfctl()
        .args(["push", "my-app", "--no-hostname", "--no-route"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Incorrect Usage: The following arguments cannot be used together: --no-hostname, --no-route",
        ))
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn test_valid_flags_reach_login_requirement() {
    let home = TestHome::new();
    home.cfctl()
        .args(["push", "my-app", "-o", "user/image", "--docker-username", "me"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Not logged in."))
        .stderr(predicate::str::contains("Incorrect Usage").not());
}

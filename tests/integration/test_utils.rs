//! Shared test utilities for integration tests
//!
//! Every binary invocation gets its own target store and settings home so
//! tests never read or write the developer's real configuration.

use assert_cmd::Command;
use cfctl::config::{ConfigRepository, Configuration, JsonConfigRepository};
use std::path::Path;
use tempfile::TempDir;

/// Isolated homes for one test.
pub struct TestHome {
    pub dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn store_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("store")
    }

    pub fn store(&self) -> JsonConfigRepository {
        JsonConfigRepository::new(self.store_dir().join("config.json"))
    }

    pub fn write_store(&self, configuration: &Configuration) {
        self.store().save(configuration).unwrap();
    }

    pub fn read_store(&self) -> Configuration {
        // Fresh repository so nothing is served from a cache.
        self.store().load().unwrap()
    }

    /// `cfctl` command pointed at this home.
    pub fn cfctl(&self) -> Command {
        let mut cmd = Command::cargo_bin("cfctl").unwrap();
        cmd.env("CFCTL_HOME", self.store_dir())
            .env("XDG_CONFIG_HOME", config_home(self.dir.path()))
            .env("CFCTL__UI__COLOR", "false")
            .env_remove("CFCTL_LOG");
        cmd
    }
}

fn config_home(root: &Path) -> std::path::PathBuf {
    root.join("xdg")
}

//! Integration test suite for the `uxr` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **render**: rendering with JSON/YAML/TOML data, stdin and output files
//! - **check**: template validation output and exit codes
//! - **escape**: selector escaping
//! - **config**: configuration file handling

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod check;
mod config;
mod escape;
mod render;

/// A scratch directory with an isolated configuration path.
pub struct TestProject {
    pub temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        uxr_template::test_utils::init_test_logging(None);
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `content` to `name` inside the project and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("uxr-config.toml")
    }

    /// A `uxr` command running in the project directory, reading its
    /// configuration from [`TestProject::config_path`].
    pub fn uxr(&self) -> Command {
        let mut cmd = Command::cargo_bin("uxr").unwrap();
        cmd.current_dir(self.temp.path())
            .env("UXR_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

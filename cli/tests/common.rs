//! # TradingPro CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command runs
//! against an explicit configuration file in a temporary directory, so a user or
//! project config on the test machine never leaks into the results.
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A `tradingpro` command with no configuration isolation.
pub fn tradingpro_cmd() -> Command {
    Command::cargo_bin("tradingpro").expect("Failed to find tradingpro binary for testing")
}

/// A temporary directory holding the configuration file for one test.
pub struct TestConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    /// Built-in defaults only.
    pub fn empty() -> Self {
        Self::with_toml("")
    }

    pub fn with_toml(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir for config");
        let path = dir.path().join("tradingpro.toml");
        std::fs::write(&path, content).expect("Failed to write test config");
        Self { dir, path }
    }

    /// A command that loads this configuration and ignores `TRADINGPRO_FORMS_KEY`.
    pub fn cmd(&self) -> Command {
        let mut cmd = tradingpro_cmd();
        cmd.arg("--config")
            .arg(&self.path)
            .env_remove("TRADINGPRO_FORMS_KEY")
            .env_remove("RUST_LOG");
        cmd
    }
}

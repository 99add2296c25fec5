//! # TradingPro Landing Page Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! Turns the `tradingpro srv` arguments into a validated `ServerConfig`:
//! - the static directory is `~`-expanded, made absolute and canonicalized
//! - the directory must exist and be a directory
//! - CORS is on unless `--no-cors` is given
//!
//! Chat and catalog settings are not repeated here; they come from the main
//! configuration loaded in `main.rs`.
//!
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use std::{env, path::PathBuf};
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Directory holding the built landing page (index.html, assets).
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Interface to bind. Use `0.0.0.0` to accept connections from the network.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    /// Absolute, canonical path of the served directory.
    pub directory: PathBuf,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            directory: PathBuf::from("."),
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    fn from_args(args: &SrvArgs) -> Self {
        Self {
            port: args.port,
            host: args.host,
            directory: args.directory.clone(),
            enable_cors: !args.no_cors,
        }
    }

    /// Expands, absolutizes and canonicalizes `directory`, then checks it is a directory.
    async fn resolve_directory(&mut self) -> Result<()> {
        let expanded =
            PathBuf::from(shellexpand::tilde(&self.directory.to_string_lossy()).into_owned());

        let absolute_path = if expanded.is_absolute() {
            expanded
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(expanded)
        };

        let canonical_path = tokio::fs::canonicalize(&absolute_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to resolve directory path: {}",
                    absolute_path.display()
                )
            })?;

        let metadata = tokio::fs::metadata(&canonical_path)
            .await
            .with_context(|| format!("Failed to read metadata for: {}", canonical_path.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!(
                "Specified path is not a directory: {}",
                canonical_path.display()
            );
        }

        debug!("Serving directory resolved to {}", canonical_path.display());
        self.directory = canonical_path;
        Ok(())
    }
}

/// Builds the effective server configuration from the command-line arguments.
pub async fn resolve_config(args: SrvArgs) -> Result<ServerConfig> {
    let mut config = ServerConfig::from_args(&args);
    config.resolve_directory().await?;
    Ok(config)
}

//! # TradingPro Landing Page Server
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! `tradingpro srv` serves the built landing page together with the chat API the
//! page's widget talks to. One process, one port:
//! - static files from the given directory (`index.html` for `/`)
//! - `/api/faq`, `/api/chat` and `/api/courses`, answered from the loaded configuration
//!
//! ## Architecture
//!
//! - `config.rs`: command-line arguments and directory resolution
//! - `api.rs`: JSON handlers and their shared state
//! - `server_logic.rs`: router assembly, port selection, graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve ./dist on http://localhost:8000
//! tradingpro srv ./dist
//!
//! # Listen on every interface, without CORS headers
//! tradingpro srv --host 0.0.0.0 --port 9000 --no-cors ./dist
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::faq::FaqResponder;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// JSON API handlers for the chat widget.
pub mod api;

/// Argument parsing and directory resolution.
pub mod config;

/// Axum server setup and lifecycle.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// Resolves the served directory, builds the API state from `app_config` and runs
/// the server until it is shut down.
pub async fn handle_srv(args: SrvArgs, app_config: &Config) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let server_config = config::resolve_config(args).await?;
    info!("Effective server config: {:?}", server_config);

    let state = api::ApiState {
        responder: Arc::new(FaqResponder::new(app_config.chat.faq_config())),
        courses: Arc::new(app_config.courses.clone()),
        reply_delay_ms: app_config.chat.reply_delay_ms,
    };

    server_logic::run_server(server_config, state).await
}

//! # TradingPro HTTP Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Serves the built landing page and the chat API from one Axum router:
//! - `/api/*` is handled by `api::router`
//! - every other path falls through to `ServeDir` (with `index.html` for directories)
//! - port availability checking with automatic fallback
//! - permissive CORS unless disabled, request tracing, graceful shutdown
//!
//! ## Examples
//!
//! ```rust
//! let server_config = config::resolve_config(args).await?;
//! server_logic::run_server(server_config, api_state).await?;
//! ```
//!
use super::api::{self, ApiState};
use super::config::ServerConfig;
use crate::core::error::Result;
use anyhow::Context;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// # Run HTTP Server (`run_server`)
///
/// Finds a free port starting at `config.port`, prints the URLs, and serves until
/// Ctrl+C or SIGTERM.
///
/// ## Errors
///
/// - no free port within `MAX_PORT_ATTEMPTS` ports
/// - the listener cannot be bound
/// - the server fails while running
pub async fn run_server(config: ServerConfig, state: ApiState) -> Result<()> {
    let addr = find_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let faq_count = state.responder.entries().len();
    let app = create_app(&config, state);

    println!("\n=================================================================");
    println!("📂 Serving landing page from: {}", config.directory.display());
    println!("🌐 Local URL:                 http://localhost:{}", addr.port());
    println!("💬 Chat API:                  http://localhost:{}/api/chat", addr.port());
    println!("❓ FAQ entries loaded:        {}", faq_count);
    println!("🔒 CORS enabled:              {}", config.enable_cors);
    println!("=================================================================\n");

    info!(
        "Starting server on {} for directory {}",
        addr,
        config.directory.display()
    );
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Tries `start_port` and the following ports until one can be bound.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, using port {} instead.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// Builds the router: API routes first, static files as the fallback.
fn create_app(config: &ServerConfig, state: ApiState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let static_files = ServeDir::new(&config.directory).append_index_html_on_directories(true);

    api::router(state)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_courses;
    use crate::core::faq::FaqResponder;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::net::Ipv4Addr;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn api_state() -> ApiState {
        ApiState {
            responder: Arc::new(FaqResponder::default()),
            courses: Arc::new(default_courses()),
            reply_delay_ms: 500,
        }
    }

    fn site() -> Result<(TempDir, ServerConfig)> {
        let temp_dir = TempDir::new()?;
        std::fs::write(
            temp_dir.path().join("index.html"),
            "<html>TRADINGPRO</html>",
        )?;
        let config = ServerConfig {
            port: 0,
            host: Ipv4Addr::LOCALHOST.into(),
            directory: temp_dir.path().to_path_buf(),
            enable_cors: true,
        };
        Ok((temp_dir, config))
    }

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50100;
        let addr = find_available_port(host, start_port, 5).await?;
        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51100;
        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let addr = find_available_port(host, start_port, 5).await?;
        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_serves_index_html() -> Result<()> {
        let (_dir, config) = site()?;
        let app = create_app(&config, api_state());

        let response = app
            .oneshot(Request::get("/").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(String::from_utf8_lossy(&bytes).contains("TRADINGPRO"));
        Ok(())
    }

    #[tokio::test]
    async fn test_api_routes_take_precedence() -> Result<()> {
        let (_dir, config) = site()?;
        let app = create_app(&config, api_state());

        let response = app
            .oneshot(Request::get("/api/faq").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_static_file_is_404() -> Result<()> {
        let (_dir, config) = site()?;
        let app = create_app(&config, api_state());

        let response = app
            .oneshot(Request::get("/missing.css").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_signal_creation() {
        let shutdown_future = shutdown_signal();
        drop(shutdown_future);
    }
}

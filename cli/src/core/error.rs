//! # TradingPro Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the TradingPro CLI.
//! The FAQ responder itself never fails; errors only come from configuration,
//! the forms backend and terminal I/O.
//!
//! ## Architecture
//!
//! - `AppError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if entry.keywords.is_empty() {
//!     return Err(AppError::Config(format!("FAQ entry '{}' has no keywords", entry.question)))?;
//! }
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if e.downcast_ref::<AppError>().is_some_and(|ae| matches!(ae, AppError::FormRejected(_))) => {
//!         println!("Backend rejected the form");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the TradingPro application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid form input: {0}")]
    FormValidation(String),

    /// Transport failure talking to the forms backend. The payload is the user-facing text.
    #[error("{0}")]
    FormNetwork(String),

    /// The backend answered with `success = false`.
    #[error("{0}")]
    FormRejected(String),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Chat I/O error: {0}")]
    ChatIo(#[from] std::io::Error),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

//! # TradingPro Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `faq`: the keyword-containment FAQ responder and its built-in table
//! - `session`: the append-only chat message log
//! - `reply`: the cancellable delayed bot reply
//! - `catalog`: the course tiers shown on the landing page
//! - `config`: configuration loading, merging and validation
//! - `error`: error types and the `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config::Config;
//! use crate::core::error::{AppError, Result};
//! use crate::core::faq::FaqResponder;
//! ```
//!
pub mod catalog;
pub mod config;
pub mod error;
pub mod faq;
pub mod reply;
pub mod session;

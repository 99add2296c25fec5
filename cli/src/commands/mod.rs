//! # TradingPro Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level command groups of the `tradingpro` CLI. Each group defines its own
//! arguments and a `handle_*` function that `main.rs` dispatches to.
//!
//! - `chat`: the FAQ assistant (interactive session, one-shot answers, FAQ listing)
//! - `courses`: the course catalog
//! - `forms`: contact and newsletter form submission
//! - `srv`: landing page server with the chat API
//!

/// FAQ chat assistant. Subcommands `start`, `ask`, `faq`.
pub mod chat;
/// Course catalog listing.
pub mod courses;
/// Lead form submission. Subcommands `contact`, `subscribe`.
pub mod forms;
/// Static landing page server plus JSON API.
pub mod srv;

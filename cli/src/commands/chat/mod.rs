//! # TradingPro Chat Commands
//!
//! File: cli/src/commands/chat/mod.rs
//!
//! ## Overview
//!
//! The terminal rendition of the landing page chat widget. All three subcommands
//! build a `FaqResponder` from the loaded configuration; only `start` keeps a
//! conversation log and applies the typing delay.
//!
//! ## Examples
//!
//! ```bash
//! # Interactive session (type `bye` to leave)
//! tradingpro chat start
//!
//! # One-shot answer, with the reason printed on stderr
//! tradingpro chat ask --explain "Сколько стоят курсы?"
//!
//! # Show the configured questions and keywords
//! tradingpro chat faq
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::faq::FaqResponder;
use clap::{Parser, Subcommand};

/// Contains the handler and arguments for `tradingpro chat ask`.
mod ask;
/// Contains the handler for `tradingpro chat faq`.
mod faq;
/// Contains the interactive REPL behind `tradingpro chat start`.
mod start;

/// # Chat Command Group Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(subcommand)]
    command: ChatCommand,
}

#[derive(Subcommand, Debug)]
enum ChatCommand {
    /// Start an interactive chat session with the FAQ assistant.
    Start(start::StartArgs),
    /// Answer a single question and exit.
    Ask(ask::AskArgs),
    /// List the configured FAQ entries and their trigger keywords.
    Faq(faq::FaqArgs),
}

/// # Handle Chat Command (`handle_chat`)
///
/// Dispatches to the selected chat subcommand. The responder is built once here from
/// `config.chat` and shared by reference.
pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    let responder = FaqResponder::new(config.chat.faq_config());
    match args.command {
        ChatCommand::Start(args) => start::handle_start(args, &responder, config).await?,
        ChatCommand::Ask(args) => ask::handle_ask(args, &responder)?,
        ChatCommand::Faq(args) => faq::handle_faq(args, &responder)?,
    }
    Ok(())
}

//! # Chat FAQ Listing
//!
//! File: cli/src/commands/chat/faq.rs
//!
//! `tradingpro chat faq` prints the configured entries in matching order, so an
//! editor of `.tradingpro.toml` can see which entry wins a keyword overlap.
//!
use crate::core::error::Result;
use crate::core::faq::{FaqEntry, FaqResponder};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct FaqArgs {}

fn render_entries(entries: &[FaqEntry]) -> String {
    if entries.is_empty() {
        return "No FAQ entries configured. Every question gets the fallback answer.\n"
            .to_string();
    }
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, entry.question));
        out.push_str(&format!("   keywords: {}\n", entry.keywords.join(", ")));
    }
    out
}

pub fn handle_faq(_args: FaqArgs, responder: &FaqResponder) -> Result<()> {
    print!("{}", render_entries(responder.entries()));
    println!("\nFallback: {}", responder.fallback());
    Ok(())
}

//! # Chat Ask Command
//!
//! File: cli/src/commands/chat/ask.rs
//!
//! `tradingpro chat ask <TEXT>...` prints the answer for a single input, without the
//! typing delay. Words are joined with single spaces, so quoting is optional.
//! With `--explain`, the matched question and keyword go to stderr.
//!
use crate::core::error::Result;
use crate::core::faq::FaqResponder;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to answer.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Print which FAQ entry and keyword produced the answer (on stderr).
    #[arg(long)]
    explain: bool,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.text.join(" ")
    }
}

/// Describes why `responder` answered `question` the way it did.
fn explain(responder: &FaqResponder, question: &str) -> String {
    match responder.find_match(question) {
        Some(found) => format!(
            "matched #{} \"{}\" on keyword \"{}\"",
            found.index + 1,
            found.entry.question,
            found.keyword
        ),
        None => "no match, fallback used".to_string(),
    }
}

pub fn handle_ask(args: AskArgs, responder: &FaqResponder) -> Result<()> {
    let question = args.question();
    debug!("Answering one-shot question: {:?}", question);

    if args.explain {
        eprintln!("{}", explain(responder, &question));
    }
    println!("{}", responder.respond(&question));
    Ok(())
}

//! # Newsletter Signup
//!
//! File: cli/src/commands/forms/subscribe.rs
//!
use super::{email, submit_form, BackendArgs};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;

const SUCCESS_TEXT: &str = "Вы успешно подписались!";

#[derive(Parser, Debug)]
pub struct SubscribeArgs {
    /// Email address to subscribe.
    #[arg(long)]
    email: String,

    #[command(flatten)]
    backend: BackendArgs,
}

pub async fn handle_subscribe(args: SubscribeArgs, config: &Config) -> Result<()> {
    let fields = vec![("email", email(&args.email)?)];
    submit_form(&args.backend, config, fields, SUCCESS_TEXT).await
}

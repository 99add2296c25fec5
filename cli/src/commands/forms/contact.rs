//! # Contact Form
//!
//! File: cli/src/commands/forms/contact.rs
//!
//! `tradingpro forms contact` sends a contact request. Name, email and message are
//! required; phone is optional and omitted from the submission when blank.
//!
use super::{email, required, submit_form, BackendArgs};
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use clap::Parser;

const SUCCESS_TEXT: &str =
    "Сообщение отправлено! Спасибо за обращение. Мы свяжемся с вами в ближайшее время.";

#[derive(Parser, Debug)]
pub struct ContactArgs {
    /// Your name.
    #[arg(long)]
    name: String,

    /// Email address to reply to.
    #[arg(long)]
    email: String,

    /// Phone number (optional).
    #[arg(long)]
    phone: Option<String>,

    /// Your message.
    #[arg(long)]
    message: String,

    #[command(flatten)]
    backend: BackendArgs,
}

impl ContactArgs {
    fn fields(&self) -> std::result::Result<Vec<(&'static str, String)>, AppError> {
        let mut fields = vec![
            ("name", required("name", &self.name)?),
            ("email", email(&self.email)?),
        ];
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            fields.push(("phone", phone.to_string()));
        }
        fields.push(("message", required("message", &self.message)?));
        Ok(fields)
    }
}

pub async fn handle_contact(args: ContactArgs, config: &Config) -> Result<()> {
    let fields = args.fields()?;
    submit_form(&args.backend, config, fields, SUCCESS_TEXT).await
}

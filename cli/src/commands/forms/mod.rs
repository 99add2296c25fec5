//! # TradingPro Lead Forms
//!
//! File: cli/src/commands/forms/mod.rs
//!
//! ## Overview
//!
//! Submits the two landing page forms to the external forms service:
//! - `contact`: name, email, optional phone and a message
//! - `subscribe`: the newsletter signup (email only)
//!
//! Required fields are checked locally before any request goes out. The backend
//! endpoint and access key come from `[forms]` in the configuration, and can be
//! overridden with `--endpoint` / `--access-key` (or `TRADINGPRO_FORMS_KEY`).
//!
//! ## Examples
//!
//! ```bash
//! tradingpro forms subscribe --email student@example.com
//! tradingpro forms contact --name "Анна" --email anna@example.com \
//!     --message "Хочу на продвинутый курс"
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

/// Forms service client and submission state.
pub mod client;
/// Contact form fields and handler.
mod contact;
/// Newsletter signup fields and handler.
mod subscribe;

use client::{FormSubmission, FormsClient};

#[derive(Parser, Debug)]
pub struct FormsArgs {
    #[command(subcommand)]
    command: FormsCommand,
}

#[derive(Subcommand, Debug)]
enum FormsCommand {
    /// Send a contact request.
    Contact(contact::ContactArgs),
    /// Subscribe an email address to the newsletter.
    Subscribe(subscribe::SubscribeArgs),
}

/// Backend overrides shared by every form.
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Forms service access key.
    #[arg(long, env = "TRADINGPRO_FORMS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Forms service endpoint URL.
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl BackendArgs {
    /// Builds a client, preferring flags over the configuration.
    fn client(&self, config: &Config) -> Result<FormsClient> {
        let access_key = self
            .access_key
            .as_deref()
            .or(config.forms.access_key.as_deref())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(AppError::Config(
                    "No forms access key. Set [forms] access_key, TRADINGPRO_FORMS_KEY or --access-key."
                        .to_string()
                ))
            })?;
        let endpoint = self.endpoint.as_deref().unwrap_or(config.forms.endpoint.as_str());
        FormsClient::new(endpoint, access_key)
    }
}

/// Required, non-blank field.
pub(crate) fn required(name: &str, value: &str) -> std::result::Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::FormValidation(format!("{} is required", name)));
    }
    Ok(trimmed.to_string())
}

/// Same check a browser applies to `type="email"`: something on both sides of one `@`.
pub(crate) fn email(value: &str) -> std::result::Result<String, AppError> {
    let email = required("email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(AppError::FormValidation(format!(
            "'{}' is not a valid email address",
            email
        ))),
    }
}

/// Validates, submits and reports one form.
async fn submit_form(
    backend: &BackendArgs,
    config: &Config,
    fields: Vec<(&str, String)>,
    success_text: &str,
) -> Result<()> {
    let client = backend.client(config)?;
    let mut submission = FormSubmission::new();
    println!("Отправка...");
    let outcome = submission.submit(&client, &fields).await;
    debug!("Form submission finished in state {:?}", submission.state());
    outcome?;
    info!("Form submitted with {} fields.", fields.len());
    println!("{}", success_text);
    Ok(())
}

pub async fn handle_forms(args: FormsArgs, config: &Config) -> Result<()> {
    match args.command {
        FormsCommand::Contact(args) => contact::handle_contact(args, config).await?,
        FormsCommand::Subscribe(args) => subscribe::handle_subscribe(args, config).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Анна ").unwrap(), "Анна");
        let err = required("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Invalid form input: name is required");
    }

    #[test]
    fn test_email_check() {
        assert!(email("student@example.com").is_ok());
        assert!(email("student").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("student@").is_err());
        assert!(email("a@b@c").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn test_missing_access_key_is_config_error() {
        let backend = BackendArgs {
            access_key: None,
            endpoint: None,
        };
        let err = backend.client(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No forms access key"));
    }

    #[test]
    fn test_flag_overrides_config_key() {
        let mut config = Config::default();
        config.forms.access_key = Some("from-config".into());
        let backend = BackendArgs {
            access_key: Some("from-flag".into()),
            endpoint: Some("http://127.0.0.1:1/submit".into()),
        };
        assert!(backend.client(&config).is_ok());
    }

    #[test]
    fn test_parses_subscribe() {
        let args = FormsArgs::try_parse_from([
            "forms",
            "subscribe",
            "--email",
            "a@b.c",
            "--access-key",
            "k",
        ])
        .unwrap();
        assert!(matches!(args.command, FormsCommand::Subscribe(_)));
    }
}

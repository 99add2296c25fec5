//! # Forms Backend Client
//!
//! File: cli/src/commands/forms/client.rs
//!
//! ## Overview
//!
//! Talks to the third-party forms service behind the landing page forms. A submission
//! is one form-encoded POST carrying the form fields plus the service `access_key`;
//! the answer is a JSON body `{"success": bool, "message": "..."}`.
//!
//! `FormSubmission` is the caller-side state around a submission: it refuses a second
//! submit while one is in flight and keeps the user-facing error text. No retries;
//! the user resubmits manually.
//!
//! ## Examples
//!
//! ```rust
//! let client = FormsClient::new(&config.forms.endpoint, access_key)?;
//! let mut submission = FormSubmission::new();
//! submission.submit(&client, &[("email", "me@example.com".to_string())]).await?;
//! ```
//!
use crate::core::error::{AppError, Result};
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const NETWORK_ERROR_TEXT: &str = "Ошибка сети. Попробуйте снова.";
pub const GENERIC_ERROR_TEXT: &str = "Что-то пошло не так";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Body returned by the forms backend.
#[derive(Deserialize, Debug)]
struct BackendResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn is_loopback(endpoint: &str) -> bool {
    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct FormsClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl FormsClient {
    pub fn new(endpoint: &str, access_key: &str) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if is_loopback(endpoint) {
            // Local backends (development, tests) never go through a system proxy.
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .context("Failed to build HTTP client for the forms backend")?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            access_key: access_key.to_string(),
        })
    }

    /// Posts `fields` plus the access key. Errors carry the text to show the user.
    pub async fn post(&self, fields: &[(&str, String)]) -> std::result::Result<(), AppError> {
        let mut params: Vec<(&str, &str)> = fields
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        params.push(("access_key", self.access_key.as_str()));

        debug!("Submitting {} form fields to {}", fields.len(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!("Forms backend request failed: {}", e);
                AppError::FormNetwork(NETWORK_ERROR_TEXT.to_string())
            })?;

        let status = response.status();
        let body: BackendResponse = response.json().await.map_err(|e| {
            warn!("Unreadable forms backend response ({}): {}", status, e);
            AppError::FormNetwork(NETWORK_ERROR_TEXT.to_string())
        })?;

        if body.success {
            info!("Forms backend accepted the submission.");
            Ok(())
        } else {
            let message = body
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_ERROR_TEXT.to_string());
            warn!("Forms backend rejected the submission ({}): {}", status, message);
            Err(AppError::FormRejected(message))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Submission lifecycle of one form.
#[derive(Debug)]
pub struct FormSubmission {
    state: FormState,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FormState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enters `Submitting`, clearing a previous error. Refused while in flight.
    pub fn begin(&mut self) -> std::result::Result<(), AppError> {
        if self.state == FormState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        self.state = FormState::Submitting;
        Ok(())
    }

    pub fn finish(&mut self, outcome: &std::result::Result<(), AppError>) {
        self.state = match outcome {
            Ok(()) => FormState::Succeeded,
            Err(e) => FormState::Failed(e.to_string()),
        };
    }

    /// Back to a blank form after a success or failure.
    pub fn reset(&mut self) {
        self.state = FormState::Idle;
    }

    pub async fn submit(
        &mut self,
        client: &FormsClient,
        fields: &[(&str, String)],
    ) -> std::result::Result<(), AppError> {
        self.begin()?;
        let outcome = client.post(fields).await;
        self.finish(&outcome);
        outcome
    }
}

impl Default for FormSubmission {
    fn default() -> Self {
        Self::new()
    }
}

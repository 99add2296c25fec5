//! # TradingPro Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges and validates the assistant configuration: the FAQ table and chat
//! texts, the forms backend, and the course catalog.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <PATH>` file (replaces the search below)
//! 2. Project-specific `.tradingpro.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Files are parsed into an all-optional `ConfigFile`, overlaid field by field,
//! then resolved against the defaults and validated.
//!
//! ## Examples
//!
//! ```toml
//! [chat]
//! greeting = "Здравствуйте! Чем могу помочь?"
//! reply_delay_ms = 500
//!
//! [[chat.faq]]
//! question = "Есть ли рассрочка?"
//! answer = "Да, на 3 месяца без переплаты."
//! keywords = ["рассрочк", "частями"]
//!
//! [forms]
//! access_key = "..."
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let responder = FaqResponder::new(cfg.chat.faq_config());
//! ```
//!
use crate::core::catalog::{default_courses, CourseTier};
use crate::core::error::{AppError, Result};
use crate::core::faq::{default_entries, FaqConfig, FaqEntry, DEFAULT_FALLBACK};
use crate::core::reply::DEFAULT_REPLY_DELAY;
use crate::core::session::DEFAULT_GREETING;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".tradingpro.toml";
pub const DEFAULT_FORMS_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub chat: ChatConfig,
    pub forms: FormsConfig,
    pub courses: Vec<CourseTier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub greeting: String,
    pub fallback: String,
    pub reply_delay_ms: u64,
    pub faq: Vec<FaqEntry>,
}

impl ChatConfig {
    pub fn faq_config(&self) -> FaqConfig {
        FaqConfig {
            entries: self.faq.clone(),
            fallback: self.fallback.clone(),
        }
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormsConfig {
    pub endpoint: String,
    pub access_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigFile::default().resolve()
    }
}

/// On-disk shape. Every field is optional so layers can be overlaid.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    chat: ChatSection,
    #[serde(default)]
    forms: FormsSection,
    courses: Option<Vec<CourseTier>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ChatSection {
    greeting: Option<String>,
    fallback: Option<String>,
    reply_delay_ms: Option<u64>,
    faq: Option<Vec<FaqEntry>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct FormsSection {
    endpoint: Option<String>,
    access_key: Option<String>,
}

impl ConfigFile {
    /// Fields set in `self` win over `base`.
    fn overlay(self, base: ConfigFile) -> ConfigFile {
        ConfigFile {
            chat: ChatSection {
                greeting: self.chat.greeting.or(base.chat.greeting),
                fallback: self.chat.fallback.or(base.chat.fallback),
                reply_delay_ms: self.chat.reply_delay_ms.or(base.chat.reply_delay_ms),
                faq: self.chat.faq.or(base.chat.faq),
            },
            forms: FormsSection {
                endpoint: self.forms.endpoint.or(base.forms.endpoint),
                access_key: self.forms.access_key.or(base.forms.access_key),
            },
            courses: self.courses.or(base.courses),
        }
    }

    fn resolve(self) -> Config {
        Config {
            chat: ChatConfig {
                greeting: self
                    .chat
                    .greeting
                    .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
                fallback: self
                    .chat
                    .fallback
                    .unwrap_or_else(|| DEFAULT_FALLBACK.to_string()),
                reply_delay_ms: self
                    .chat
                    .reply_delay_ms
                    .unwrap_or(DEFAULT_REPLY_DELAY.as_millis() as u64),
                faq: self.chat.faq.unwrap_or_else(default_entries),
            },
            forms: FormsConfig {
                endpoint: self
                    .forms
                    .endpoint
                    .unwrap_or_else(|| DEFAULT_FORMS_ENDPOINT.to_string()),
                access_key: self.forms.access_key,
            },
            courses: self.courses.unwrap_or_else(default_courses),
        }
    }
}

/// Loads the effective configuration. `explicit` bypasses the file search.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let layered = match explicit {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user = load_user_config()?.unwrap_or_default();
            match load_project_config()? {
                Some(project) => project.overlay(user),
                None => user,
            }
        }
    };
    let config = layered.resolve();
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "TradingPro", "tradingpro") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.tradingpro.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn validate_config(config: &Config) -> Result<()> {
    if config.chat.greeting.trim().is_empty() {
        return Err(anyhow!(AppError::Config(
            "chat.greeting must not be empty".to_string()
        )));
    }
    if config.chat.fallback.trim().is_empty() {
        return Err(anyhow!(AppError::Config(
            "chat.fallback must not be empty".to_string()
        )));
    }
    for entry in &config.chat.faq {
        if entry.answer.trim().is_empty() {
            return Err(anyhow!(AppError::Config(format!(
                "FAQ entry '{}' has an empty answer.",
                entry.question
            ))));
        }
        if entry.keywords.is_empty() {
            return Err(anyhow!(AppError::Config(format!(
                "FAQ entry '{}' has no keywords.",
                entry.question
            ))));
        }
        for keyword in &entry.keywords {
            // An empty keyword would be contained in every input.
            if keyword.is_empty() {
                return Err(anyhow!(AppError::Config(format!(
                    "FAQ entry '{}' has an empty keyword.",
                    entry.question
                ))));
            }
            if keyword.to_lowercase() != *keyword {
                return Err(anyhow!(AppError::Config(format!(
                    "FAQ keyword '{}' in entry '{}' must be lowercase.",
                    keyword, entry.question
                ))));
            }
        }
    }
    let endpoint = &config.forms.endpoint;
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(anyhow!(AppError::Config(format!(
            "Invalid forms endpoint '{}'. Expected an http(s) URL.",
            endpoint
        ))));
    }
    Ok(())
}

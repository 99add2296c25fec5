//! # TradingPro CLI Forms Integration Tests
//!
//! File: cli/tests/forms.rs
//!
//! ## Overview
//!
//! Failure paths of `tradingpro forms` that need no live backend: local field
//! validation, a missing access key and an unreachable endpoint. Successful
//! submissions are covered by the client tests against a mock backend.
//!
mod common;
use common::*;
use predicates::prelude::*;

const UNREACHABLE: &str = "http://127.0.0.1:1/submit";

#[test]
fn test_subscribe_rejects_invalid_email_before_sending() {
    TestConfig::empty()
        .cmd()
        .args(["forms", "subscribe", "--email", "not-an-email"])
        .args(["--access-key", "test-key", "--endpoint", UNREACHABLE])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Отправка...").not())
        .stderr(predicate::str::contains("not a valid email address"));
}

#[test]
fn test_contact_rejects_blank_name() {
    TestConfig::empty()
        .cmd()
        .args(["forms", "contact", "--name", "  ", "--email", "anna@example.com"])
        .args(["--message", "Здравствуйте", "--access-key", "test-key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("name is required"));
}

#[test]
fn test_contact_requires_message_flag() {
    TestConfig::empty()
        .cmd()
        .args(["forms", "contact", "--name", "Анна", "--email", "anna@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--message"));
}

#[test]
fn test_missing_access_key() {
    TestConfig::empty()
        .cmd()
        .args(["forms", "subscribe", "--email", "student@example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No forms access key"));
}

#[test]
fn test_access_key_from_environment() {
    TestConfig::empty()
        .cmd()
        .env("TRADINGPRO_FORMS_KEY", "env-key")
        .args(["forms", "subscribe", "--email", "student@example.com"])
        .args(["--endpoint", UNREACHABLE])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No forms access key").not())
        .stderr(predicate::str::contains("Ошибка сети. Попробуйте снова."));
}

#[test]
fn test_unreachable_backend_is_network_error() {
    let config = TestConfig::with_toml(&format!(
        "[forms]\nendpoint = \"{}\"\naccess_key = \"from-config\"\n",
        UNREACHABLE
    ));
    config
        .cmd()
        .args(["f", "subscribe", "--email", "student@example.com"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Отправка..."))
        .stderr(predicate::str::contains("Ошибка сети. Попробуйте снова."));
}

//! # Chat Session Log
//!
//! File: cli/src/core/session.rs
//!
//! ## Overview
//!
//! A `ChatSession` owns the ordered, append-only message log for one chat widget
//! lifetime. The FAQ responder stays a pure lookup; the session is presentation state.
//!
//! Messages get strictly increasing ids starting at 1 (the greeting). There is no
//! API to remove or edit a message; the log goes away with the session.
//!
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_GREETING: &str = "Здравствуйте! Чем могу помочь?";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Utc>,
}

/// Returns true when `text` is worth sending (has a non-whitespace character).
pub fn is_submittable(text: &str) -> bool {
    !text.trim().is_empty()
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ConversationMessage>,
    next_id: u64,
}

#[allow(clippy::len_without_is_empty)]
impl ChatSession {
    /// Starts a session whose log holds a single bot greeting.
    pub fn new(greeting: &str) -> Self {
        let mut session = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        session.push(greeting.to_string(), Sender::Bot);
        session
    }

    pub fn push_user(&mut self, text: &str) -> &ConversationMessage {
        self.push(text.to_string(), Sender::User)
    }

    pub fn push_bot(&mut self, text: &str) -> &ConversationMessage {
        self.push(text.to_string(), Sender::Bot)
    }

    fn push(&mut self, text: String, sender: Sender) -> &ConversationMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ConversationMessage {
            id,
            text,
            sender,
            sent_at: Utc::now(),
        });
        tracing::trace!("Appended {} message #{}", sender, id);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    /// Never zero: the greeting is always the first message.
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_greeting() {
        let session = ChatSession::default();
        assert_eq!(session.len(), 1);
        let greeting = &session.messages()[0];
        assert_eq!(greeting.id, 1);
        assert_eq!(greeting.sender, Sender::Bot);
        assert_eq!(greeting.text, DEFAULT_GREETING);
    }

    #[test]
    fn test_session_always_holds_greeting() {
        let session = ChatSession::new("");
        assert_eq!(session.len(), 1);
        assert_eq!(session.last().map(|m| m.sender), Some(Sender::Bot));
    }

    #[test]
    fn test_ids_increase_and_order_is_kept() {
        let mut session = ChatSession::new("hi");
        session.push_user("Сколько стоят курсы?");
        session.push_bot("15,000₽");
        session.push_user("спасибо");

        let ids: Vec<u64> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::Bot, Sender::User, Sender::Bot, Sender::User]
        );
        assert_eq!(session.last().map(|m| m.text.as_str()), Some("спасибо"));
    }

    #[test]
    fn test_push_returns_appended_message() {
        let mut session = ChatSession::default();
        let msg = session.push_user("вопрос");
        assert_eq!(msg.id, 2);
        assert_eq!(msg.text, "вопрос");
    }

    #[test]
    fn test_is_submittable() {
        assert!(is_submittable("вопрос"));
        assert!(is_submittable("  a "));
        assert!(!is_submittable(""));
        assert!(!is_submittable(" \t\n"));
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }
}

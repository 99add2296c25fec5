//! # TradingPro Chat API
//!
//! File: cli/src/commands/srv/api.rs
//!
//! ## Overview
//!
//! JSON endpoints used by the landing page chat widget:
//! - `GET  /api/faq`     configured questions and keywords, in matching order
//! - `POST /api/chat`    `{"text": ...}` → answer, matched question and reply delay
//! - `GET  /api/courses` the course catalog
//!
//! The server answers immediately. `reply_delay_ms` tells the widget how long to
//! wait before showing the answer, so the typing delay stays a UI concern.
//!
use crate::core::catalog::CourseTier;
use crate::core::faq::FaqResponder;
use crate::core::session::is_submittable;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Shared, read-only state for the API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub responder: Arc<FaqResponder>,
    pub courses: Arc<Vec<CourseTier>>,
    pub reply_delay_ms: u64,
}

#[derive(Serialize, Debug)]
struct FaqSummary<'a> {
    question: &'a str,
    keywords: &'a [String],
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
    pub matched_question: Option<String>,
    pub reply_delay_ms: u64,
}

async fn list_faq(State(state): State<ApiState>) -> Json<Value> {
    let summaries: Vec<FaqSummary<'_>> = state
        .responder
        .entries()
        .iter()
        .map(|entry| FaqSummary {
            question: &entry.question,
            keywords: &entry.keywords,
        })
        .collect();
    Json(json!(summaries))
}

async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    if !is_submittable(&request.text) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message text must not be blank" })),
        ));
    }

    let found = state.responder.find_match(&request.text);
    let response = match found {
        Some(found) => {
            debug!("Chat API: FAQ #{} matched on {:?}", found.index + 1, found.keyword);
            ChatResponse {
                answer: found.entry.answer.clone(),
                matched_question: Some(found.entry.question.clone()),
                reply_delay_ms: state.reply_delay_ms,
            }
        }
        None => {
            debug!("Chat API: no FAQ match, answering with fallback");
            ChatResponse {
                answer: state.responder.fallback().to_string(),
                matched_question: None,
                reply_delay_ms: state.reply_delay_ms,
            }
        }
    };
    Ok(Json(response))
}

async fn list_courses(State(state): State<ApiState>) -> Json<Vec<CourseTier>> {
    Json(state.courses.as_ref().clone())
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/faq", get(list_faq))
        .route("/api/chat", post(chat))
        .route("/api/courses", get(list_courses))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::default_courses;
    use crate::core::faq::{default_entries, DEFAULT_FALLBACK};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn state() -> ApiState {
        ApiState {
            responder: Arc::new(FaqResponder::default()),
            courses: Arc::new(default_courses()),
            reply_delay_ms: 500,
        }
    }

    async fn post_chat(body: &str) -> (StatusCode, Value) {
        let response = router(state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_chat_returns_matched_answer() {
        let (status, body) = post_chat(r#"{"text": "Сколько стоят курсы?"}"#).await;
        assert_eq!(status, StatusCode::OK);
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.answer, default_entries()[0].answer);
        assert_eq!(
            response.matched_question.as_deref(),
            Some("Сколько стоят курсы?")
        );
        assert_eq!(response.reply_delay_ms, 500);
    }

    #[tokio::test]
    async fn test_chat_returns_fallback() {
        let (status, body) = post_chat(r#"{"text": "Привет, как дела?"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], DEFAULT_FALLBACK);
        assert!(body["matched_question"].is_null());
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_text() {
        let (status, body) = post_chat(r#"{"text": "   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_json() {
        let (status, _) = post_chat("not json").await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_faq_listing_keeps_order() {
        let response = router(state())
            .oneshot(Request::get("/api/faq").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let questions: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["question"].as_str().unwrap())
            .collect();
        assert_eq!(
            questions,
            vec![
                "Сколько стоят курсы?",
                "Как долго длится обучение?",
                "Нужен ли опыт?",
                "Есть ли поддержка?"
            ]
        );
        assert!(body[0].get("answer").is_none());
    }

    #[tokio::test]
    async fn test_courses_listing() {
        let response = router(state())
            .oneshot(Request::get("/api/courses").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let courses: Vec<CourseTier> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(courses, default_courses());
    }
}

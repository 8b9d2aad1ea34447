#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup and fixtures for the `repostly` integration tests.

use repostly::types::StructuredContent;
use serde_json::{json, Value};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("repostly=debug")
            .with_test_writer()
            .init();
    });
}

/// A record with every field populated.
pub fn sample_content() -> StructuredContent {
    StructuredContent {
        caption: "Feeling grateful today #blessed #mood".to_string(),
        hashtags: vec!["#blessed".to_string(), "#mood".to_string()],
        audio: "original sound - sunny".to_string(),
    }
}

/// A chat-completions success body carrying `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// The error body the chat-completions API returns for an unknown model.
pub fn model_not_found_body(model: &str) -> Value {
    json!({
        "error": {
            "message": format!("The model `{model}` does not exist or you do not have access to it."),
            "type": "invalid_request_error",
            "code": "model_not_found"
        }
    })
}

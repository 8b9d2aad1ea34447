pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Sampling parameters sent with every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

/// A single chat-style generation call: one system message, one user message.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_prompt: &'a str,
    pub params: SamplingParams,
}

/// A trait for interacting with a text-generation service.
///
/// Implementations report a rejected model identifier as
/// [`PromptError::ModelUnavailable`] so callers can retry with another model.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the request and returns the generated text.
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);

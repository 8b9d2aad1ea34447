//! # Shared Data Types
//!
//! The record threaded through a single analysis request, the draft form the
//! extractors build it from, the outbound response envelope, and the settings
//! that describe the text-generation service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder caption used by the HTML extractor when nothing is found.
pub const CAPTION_NOT_FOUND: &str = "No caption found";
/// Placeholder caption used by the OCR text parser when no line is found.
pub const CAPTION_NOT_DETECTED: &str = "No caption detected";
/// Placeholder audio label used by both extractors.
pub const UNKNOWN_AUDIO: &str = "Unknown audio";
/// Maximum number of hashtags kept on a record.
pub const MAX_HASHTAGS: usize = 10;

/// The caption/hashtags/audio record extracted from a link or a screenshot.
///
/// `caption` and `audio` are never empty: when nothing was extracted they hold
/// one of the placeholder constants. `hashtags` holds at most [`MAX_HASHTAGS`]
/// unique entries in order of first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub audio: String,
}

impl StructuredContent {
    /// True when the audio label is a real extracted value rather than a placeholder.
    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty() && self.audio != UNKNOWN_AUDIO
    }
}

/// A partially filled record, before placeholders are applied.
///
/// Extractors build a draft first so callers can tell "nothing extracted"
/// apart from "placeholder values".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub caption: Option<String>,
    pub hashtags: Vec<String>,
    pub audio: Option<String>,
}

impl ContentDraft {
    /// True when no field carries any extracted signal.
    pub fn is_empty(&self) -> bool {
        self.caption.as_deref().map_or(true, str::is_empty)
            && self.audio.as_deref().map_or(true, str::is_empty)
            && self.hashtags.is_empty()
    }

    /// Applies placeholders to missing fields and produces the final record.
    pub fn finalize(self, caption_placeholder: &str) -> StructuredContent {
        let mut hashtags = self.hashtags;
        hashtags.truncate(MAX_HASHTAGS);

        StructuredContent {
            caption: self
                .caption
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| caption_placeholder.to_string()),
            hashtags,
            audio: self
                .audio
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUDIO.to_string()),
        }
    }
}

/// The response envelope returned by the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn success(analysis: impl Into<String>) -> Self {
        Self {
            success: true,
            analysis: Some(analysis.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

/// Settings for the text-generation service and the calls made to it.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    /// The provider type: "openai", "local" (OpenAI-compatible, no key needed) or "gemini".
    pub provider: String,
    /// Endpoint URL. When unset, the provider's public endpoint is used.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    /// The model asked first.
    pub model: String,
    /// The model retried once, with a reduced prompt, when `model` is unavailable.
    pub fallback_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    /// Overrides the default system prompt.
    pub system_prompt: Option<String>,
    /// Overrides the default user prompt template.
    pub user_prompt: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_url: None,
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            fallback_model: "gpt-3.5-turbo".to_string(),
            max_tokens: 400,
            temperature: 0.8,
            presence_penalty: 0.3,
            frequency_penalty: 0.3,
            system_prompt: None,
            user_prompt: None,
        }
    }
}

impl fmt::Debug for GenerationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationSettings")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("fallback_model", &self.fallback_model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("presence_penalty", &self.presence_penalty)
            .field("frequency_penalty", &self.frequency_penalty)
            .finish_non_exhaustive()
    }
}

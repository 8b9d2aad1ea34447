//! API payloads for the `repostly-server`.

use serde::{Deserialize, Serialize};

/// The `/analyze` request body. Exactly one field must carry a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub tiktok_url: Option<String>,
    /// Base64 screenshot, optionally data-URI prefixed.
    #[serde(default)]
    pub screenshot_base64: Option<String>,
}

/// The validated input of an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeInput<'a> {
    Link(&'a str),
    Screenshot(&'a str),
}

impl AnalyzeRequest {
    /// Resolves the single input. Blank fields count as absent; `None` when
    /// neither or both are present.
    pub fn input(&self) -> Option<AnalyzeInput<'_>> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.trim().is_empty())
        }
        match (present(&self.tiktok_url), present(&self.screenshot_base64)) {
            (Some(url), None) => Some(AnalyzeInput::Link(url.trim())),
            (None, Some(image)) => Some(AnalyzeInput::Screenshot(image)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub generation_service_configured: bool,
}

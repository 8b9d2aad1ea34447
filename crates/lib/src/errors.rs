use thiserror::Error;

/// Errors raised while talking to a text-generation service.
///
/// None of these reach the end user: the insight generator absorbs them and
/// falls back to local synthesis.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned status {status}: {message}")]
    AiApi { status: u16, message: String },
    #[error("Model '{0}' is not available")]
    ModelUnavailable(String),
    #[error("AI provider returned an empty completion")]
    EmptyCompletion,
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
    #[error("Unsupported AI provider type: {0}")]
    UnsupportedProvider(String),
}

impl PromptError {
    /// Whether the service rejected the requested model identifier.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, PromptError::ModelUnavailable(_))
    }
}

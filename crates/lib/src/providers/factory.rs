//! # AI Provider Factory
//!
//! Resolves [`GenerationSettings`] into a concrete provider once, at startup.
//! A provider that needs a credential is only created when one is configured;
//! otherwise the factory returns `None` and the insight generator works from
//! local synthesis alone.

use crate::{
    errors::PromptError,
    providers::ai::{
        gemini::{GeminiProvider, GEMINI_MODELS_URL},
        openai::{OpenAiProvider, OPENAI_CHAT_COMPLETIONS_URL},
        AiProvider,
    },
    types::GenerationSettings,
};
use tracing::info;

/// Creates the configured AI provider, or `None` when it lacks a credential.
pub fn create_provider(
    settings: &GenerationSettings,
) -> Result<Option<Box<dyn AiProvider>>, PromptError> {
    let api_key = settings.api_key.clone().filter(|k| !k.trim().is_empty());

    let provider: Box<dyn AiProvider> = match settings.provider.as_str() {
        "openai" => {
            let Some(api_key) = api_key else {
                info!("No API key configured for the openai provider; generation service disabled.");
                return Ok(None);
            };
            let api_url = settings
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            info!("Configuring OpenAI provider with URL: {}", api_url);
            Box::new(OpenAiProvider::new(api_url, Some(api_key))?)
        }
        "local" => {
            let api_url = settings.api_url.clone().ok_or_else(|| {
                PromptError::MissingAiProvider(
                    "api_url is required for the local provider".to_string(),
                )
            })?;
            info!("Configuring local OpenAI-compatible provider with URL: {}", api_url);
            Box::new(OpenAiProvider::new(api_url, api_key)?)
        }
        "gemini" => {
            let Some(api_key) = api_key else {
                info!("No API key configured for the gemini provider; generation service disabled.");
                return Ok(None);
            };
            let api_base = settings
                .api_url
                .clone()
                .unwrap_or_else(|| GEMINI_MODELS_URL.to_string());
            info!("Configuring Gemini provider with URL: {}", api_base);
            Box::new(GeminiProvider::new(api_base, api_key)?)
        }
        other => return Err(PromptError::UnsupportedProvider(other.to_string())),
    };

    Ok(Some(provider))
}

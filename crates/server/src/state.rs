//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Nothing in it is mutated after construction;
//! concurrent requests only share read-only handles.

use crate::config::AppConfig;
use repostly::{providers::ai::AiProvider, providers::factory::create_provider, InsightGenerator};
use repostly_ocr::{ImageTextRecognizer, OcrEngine, TesseractEngine};
use repostly_web::ContentFetcher;
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The resolved configuration.
    pub config: Arc<AppConfig>,
    /// Outbound client for video pages.
    pub fetcher: ContentFetcher,
    /// Screenshot OCR.
    pub recognizer: ImageTextRecognizer,
    /// Insight generation, with the provider resolved once at startup.
    pub insight: Arc<InsightGenerator>,
}

/// Builds the shared application state from the configuration.
///
/// The generation provider is created only when a credential is configured
/// (or a keyless local endpoint is named). Without one, every analysis is
/// composed locally.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider = create_provider(&config.generation)?;
    match &provider {
        Some(_) => info!(
            "Generation service '{}' configured with model '{}'.",
            config.generation.provider, config.generation.model
        ),
        None => warn!("No generation service credential configured; analyses will be composed locally."),
    }

    let engine = Arc::new(TesseractEngine::new(config.ocr.tesseract_path.clone()));
    build_app_state_with(config, provider, engine)
}

/// Builds the state from explicit collaborators. Used by `build_app_state`
/// and by tests that substitute the provider or the OCR engine.
pub fn build_app_state_with(
    config: AppConfig,
    provider: Option<Box<dyn AiProvider>>,
    engine: Arc<dyn OcrEngine>,
) -> anyhow::Result<AppState> {
    let fetcher = ContentFetcher::new(config.fetch.clone())?;
    let recognizer = ImageTextRecognizer::new(engine, config.ocr.clone());
    let insight = InsightGenerator::new(provider, config.generation.clone());

    Ok(AppState {
        config: Arc::new(config),
        fetcher,
        recognizer,
        insight: Arc::new(insight),
    })
}

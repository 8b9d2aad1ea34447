//! # Insight Generation
//!
//! Turns a [`StructuredContent`] record into a short psychological read of the
//! repost. The configured provider is asked first; when the primary model is
//! unavailable the call is retried once with a reduced prompt against the
//! fallback model. Any remaining failure is absorbed by local synthesis, so
//! [`InsightGenerator::generate`] never fails.

pub mod fallback;

use crate::{
    errors::PromptError,
    prompts::{InsightPrompts, PromptVariant, CONTEXT_SENTENCES},
    providers::ai::{AiProvider, GenerationRequest, SamplingParams},
    types::{GenerationSettings, StructuredContent},
};
use rand::seq::IndexedRandom;
use tracing::{info, warn};

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSource {
    /// The primary model answered the full prompt.
    Primary,
    /// The fallback model answered the reduced prompt.
    ReducedPrompt,
    /// The analysis was composed locally.
    LocalSynthesis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub text: String,
    pub source: InsightSource,
}

/// Generates analyses, optionally backed by a text-generation provider.
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    provider: Option<Box<dyn AiProvider>>,
    settings: GenerationSettings,
    prompts: InsightPrompts,
}

impl InsightGenerator {
    pub fn new(provider: Option<Box<dyn AiProvider>>, settings: GenerationSettings) -> Self {
        let prompts = InsightPrompts::from_settings(&settings);
        Self {
            provider,
            settings,
            prompts,
        }
    }

    /// Whether a generation service is available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generates an analysis with a randomly chosen context sentence.
    pub async fn generate(&self, content: &StructuredContent) -> Insight {
        // The thread-local rng is not `Send`; keep it out of the awaited section.
        let context = {
            let mut rng = rand::rng();
            CONTEXT_SENTENCES
                .choose(&mut rng)
                .copied()
                .unwrap_or(CONTEXT_SENTENCES[0])
        };
        self.generate_with_context(content, context).await
    }

    /// Generates an analysis using the given context sentence in the full prompt.
    pub async fn generate_with_context(
        &self,
        content: &StructuredContent,
        context: &str,
    ) -> Insight {
        let Some(provider) = self.provider.as_deref() else {
            info!("Generation service not configured; using local synthesis.");
            return local_insight(content);
        };

        match self
            .call(provider, PromptVariant::Full, &self.settings.model, content, context)
            .await
        {
            Ok(text) => Insight {
                text,
                source: InsightSource::Primary,
            },
            Err(e) if e.is_model_unavailable() => {
                warn!(
                    "Model '{}' unavailable, retrying with '{}' and a reduced prompt.",
                    self.settings.model, self.settings.fallback_model
                );
                match self
                    .call(
                        provider,
                        PromptVariant::Reduced,
                        &self.settings.fallback_model,
                        content,
                        context,
                    )
                    .await
                {
                    Ok(text) => Insight {
                        text,
                        source: InsightSource::ReducedPrompt,
                    },
                    Err(e) => {
                        warn!("Fallback model failed: {e}. Using local synthesis.");
                        local_insight(content)
                    }
                }
            }
            Err(e) => {
                warn!("Generation failed: {e}. Using local synthesis.");
                local_insight(content)
            }
        }
    }

    async fn call(
        &self,
        provider: &dyn AiProvider,
        variant: PromptVariant,
        model: &str,
        content: &StructuredContent,
        context: &str,
    ) -> Result<String, PromptError> {
        let prompt = self.prompts.render(variant, content, context);
        let request = GenerationRequest {
            model,
            system_prompt: &prompt.system,
            user_prompt: &prompt.user,
            params: SamplingParams {
                max_tokens: self.settings.max_tokens,
                temperature: self.settings.temperature,
                presence_penalty: self.settings.presence_penalty,
                frequency_penalty: self.settings.frequency_penalty,
            },
        };
        provider.generate(&request).await
    }
}

fn local_insight(content: &StructuredContent) -> Insight {
    Insight {
        text: fallback::synthesize(content),
        source: InsightSource::LocalSynthesis,
    }
}

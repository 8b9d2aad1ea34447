//! # Insight Prompt Templates
//!
//! The default system and user prompts for the repost analysis, in a full
//! variant and a reduced variant used when retrying against the fallback model.
//! Both can be overridden through [`GenerationSettings`].
//!
//! Placeholders: `{caption}`, `{audio}`, `{hashtags}`, `{context}`

use super::{render, PromptValues};
use crate::types::{GenerationSettings, StructuredContent};

/// The default system prompt for the primary generation call.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert in emotional and psychological analysis of social media behavior. Provide thoughtful, empathetic analysis while maintaining appropriate boundaries and emphasizing that your insights are for entertainment purposes only. Be specific to the content provided and avoid generic responses.";

/// The shortened system prompt for the fallback model retry.
pub const REDUCED_SYSTEM_PROMPT: &str =
    "You are an expert in emotional and psychological analysis of social media behavior.";

/// The default user prompt. `{context}` receives one of [`CONTEXT_SENTENCES`].
pub const DEFAULT_USER_PROMPT: &str = r#"Based on the following TikTok repost content, infer the emotional state, mindset, and possible motivation of the person who reposted it.

{context}.

Content:
Caption: "{caption}"
Audio: "{audio}"
Hashtags: {hashtags}

Respond with 3 bullet points showing:
• Emotional tone
• Likely reasoning for reposting
• What this might say about their current mindset."#;

/// The user prompt for the fallback model retry, without the context line.
pub const REDUCED_USER_PROMPT: &str = r#"Based on the following TikTok repost content, infer the emotional state, mindset, and possible motivation of the person who reposted it.

Content:
Caption: "{caption}"
Audio: "{audio}"
Hashtags: {hashtags}

Respond with 3 bullet points showing:
• Emotional tone
• Likely reasoning for reposting
• What this might say about their current mindset."#;

/// Sentences mixed into the user prompt to vary the generated output.
pub const CONTEXT_SENTENCES: [&str; 8] = [
    "This content was reposted recently",
    "User is posting more emotionally than usual lately",
    "This appears to be a particularly meaningful repost",
    "The timing of this repost suggests personal significance",
    "This content choice reflects current emotional state",
    "User has been sharing similar themes recently",
    "This repost stands out from their usual content",
    "The selection of this content seems intentional",
];

/// Which prompt pair to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Full system instruction plus a context sentence.
    Full,
    /// Short system instruction, no context sentence.
    Reduced,
}

/// A rendered system/user prompt pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// The prompt templates in effect, after applying any configured overrides.
///
/// An override replaces both variants of that prompt. In the reduced variant,
/// `{context}` in an overridden user prompt renders as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightPrompts {
    system: String,
    reduced_system: String,
    user: String,
    reduced_user: String,
}

impl Default for InsightPrompts {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            reduced_system: REDUCED_SYSTEM_PROMPT.to_string(),
            user: DEFAULT_USER_PROMPT.to_string(),
            reduced_user: REDUCED_USER_PROMPT.to_string(),
        }
    }
}

impl InsightPrompts {
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        let mut prompts = Self::default();
        if let Some(system) = non_blank(settings.system_prompt.as_deref()) {
            prompts.system = system.to_string();
            prompts.reduced_system = system.to_string();
        }
        if let Some(user) = non_blank(settings.user_prompt.as_deref()) {
            prompts.user = user.to_string();
            prompts.reduced_user = user.to_string();
        }
        prompts
    }

    /// Renders the chosen variant for `content`. `context` is ignored for
    /// [`PromptVariant::Reduced`].
    pub fn render(
        &self,
        variant: PromptVariant,
        content: &StructuredContent,
        context: &str,
    ) -> RenderedPrompt {
        let (system, user, context) = match variant {
            PromptVariant::Full => (&self.system, &self.user, context),
            PromptVariant::Reduced => (&self.reduced_system, &self.reduced_user, ""),
        };
        let values = PromptValues {
            caption: &content.caption,
            audio: &content.audio,
            hashtags: &content.hashtags,
            context,
        };
        RenderedPrompt {
            system: render(system, &values),
            user: render(user, &values),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

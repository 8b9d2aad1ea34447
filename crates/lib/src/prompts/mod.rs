//! # Prompt Template Modules
//!
//! Prompt templates for the insight generator, and the renderer that fills
//! their placeholders from a [`StructuredContent`](crate::types::StructuredContent).

pub mod insight;

pub use insight::{InsightPrompts, PromptVariant, RenderedPrompt, CONTEXT_SENTENCES};

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(caption|audio|hashtags|context)\}").expect("placeholder pattern is valid")
});

/// Values substituted into a prompt template.
#[derive(Debug, Clone, Copy)]
pub struct PromptValues<'a> {
    pub caption: &'a str,
    pub audio: &'a str,
    pub hashtags: &'a [String],
    pub context: &'a str,
}

/// Renders `template`, replacing `{caption}`, `{audio}`, `{hashtags}` and `{context}`.
///
/// Substitution happens in a single pass, so placeholder-like text inside a
/// value (a caption that literally contains `{audio}`) is left untouched.
/// Unknown `{...}` sequences are kept as written.
pub fn render(template: &str, values: &PromptValues<'_>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "caption" => values.caption.to_string(),
            "audio" => values.audio.to_string(),
            "hashtags" => values.hashtags.join(", "),
            "context" => values.context.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

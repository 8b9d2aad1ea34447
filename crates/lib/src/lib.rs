//! # Repostly Core
//!
//! This crate holds the pieces shared by every Repostly component:
//!
//! - [`types::StructuredContent`], the caption/hashtags/audio record that the
//!   HTML and OCR extractors produce and the insight generator consumes.
//! - The [`providers::ai::AiProvider`] abstraction over text-generation services.
//! - The [`insight::InsightGenerator`], which turns a record into a short
//!   psychological read and falls back to local synthesis when the generation
//!   service cannot answer.

pub mod errors;
pub mod hashtags;
pub mod insight;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::PromptError;
pub use insight::{Insight, InsightGenerator, InsightSource};
pub use types::{AnalysisResult, ContentDraft, GenerationSettings, StructuredContent};

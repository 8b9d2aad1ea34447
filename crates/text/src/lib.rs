//! # `repostly-text`: OCR Text Parsing
//!
//! Turns the plain text recognized from a screenshot into a
//! [`StructuredContent`] record. Screenshot text has no markup, so the parser
//! relies on layout heuristics: the caption is the longest line, hashtags are
//! lexical `#word` matches and the audio label is the line carrying a known
//! sound attribution marker.

use repostly::{
    hashtags::HashtagCollector,
    types::CAPTION_NOT_DETECTED,
    ContentDraft, StructuredContent,
};
use tracing::debug;

/// Phrases that introduce a sound attribution, matched case-insensitively and
/// tried in this order.
pub const AUDIO_MARKERS: [&str; 4] = ["original sound", "music by", "sound by", "audio:"];

/// Extracts whatever signal the text carries, without placeholders.
pub fn parse_ocr_draft(text: &str) -> ContentDraft {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let caption = longest_line(&lines).map(str::to_string);

    let mut collector = HashtagCollector::new();
    collector.extend_from_text(text);
    let hashtags = collector.into_vec();

    let audio = audio_line(text, &lines).map(str::to_string);

    debug!(
        lines = lines.len(),
        hashtags = hashtags.len(),
        audio_found = audio.is_some(),
        "Parsed OCR text"
    );

    ContentDraft {
        caption,
        hashtags,
        audio,
    }
}

/// Parses OCR text into a complete record, filling missing fields with placeholders.
pub fn parse_ocr_text(text: &str) -> StructuredContent {
    parse_ocr_draft(text).finalize(CAPTION_NOT_DETECTED)
}

/// The longest line by character count; the earliest one wins a tie.
fn longest_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    let mut longest: Option<&'a str> = None;
    for &line in lines {
        if longest.map_or(true, |l| line.chars().count() > l.chars().count()) {
            longest = Some(line);
        }
    }
    longest
}

fn audio_line<'a>(text: &str, lines: &[&'a str]) -> Option<&'a str> {
    let lowered = text.to_lowercase();
    AUDIO_MARKERS
        .iter()
        .filter(|marker| lowered.contains(**marker))
        .find_map(|marker| {
            lines
                .iter()
                .copied()
                .find(|line| line.to_lowercase().contains(*marker))
        })
}

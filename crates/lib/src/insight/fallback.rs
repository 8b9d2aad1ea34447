//! # Local Fallback Synthesis
//!
//! Composes a three-bullet analysis from fixed sentence pools when the
//! generation service is missing or fails. The output has the same shape as a
//! real completion so callers cannot tell the two apart.

use crate::types::StructuredContent;
use rand::{seq::IndexedRandom, Rng};

pub const TONE_LABEL: &str = "• Emotional tone:";
pub const REASONING_LABEL: &str = "• Psychological reasoning:";
pub const MINDSET_LABEL: &str = "• Current mindset:";

/// Minimum caption length (in characters) before a caption note is added.
const CAPTION_NOTE_MIN_CHARS: usize = 10;
/// Minimum audio label length (in characters) before an audio note is added.
const AUDIO_NOTE_MIN_CHARS: usize = 3;

pub const EMOTIONAL_TONES: [&str; 10] = [
    "The person appears to be seeking validation and connection through relatable content, showing a desire for emotional resonance with others.",
    "The content selection reveals someone who values authenticity and genuine human connection, as evidenced by their choice of relatable material.",
    "The person shows interest in self-improvement and personal growth, choosing content that reflects positive development themes.",
    "This repost suggests someone who is processing complex emotions and seeking understanding through shared experiences.",
    "The choice of content indicates a person who is feeling introspective and contemplative about their current life situation.",
    "This sharing behavior reveals someone who is seeking comfort and reassurance during a challenging period.",
    "The content selection shows someone who is feeling optimistic and looking for positive reinforcement.",
    "This repost suggests the person is going through a period of self-discovery and personal transformation.",
    "The choice indicates someone who is feeling nostalgic and reflecting on past experiences.",
    "This content reveals someone who is seeking motivation and inspiration for their current goals.",
];

pub const PSYCHOLOGICAL_REASONINGS: [&str; 10] = [
    "This repost choice suggests they're processing their own experiences through the lens of others' stories, which is a common coping mechanism for emotional regulation.",
    "This type of sharing behavior often indicates someone who is seeking emotional validation and understanding from their social circle.",
    "The hashtags and audio choice indicate they may be going through a period of transformation or seeking inspiration.",
    "The content choice suggests they're using social media as a way to express feelings they might not be comfortable sharing directly.",
    "This repost behavior indicates someone who is looking for confirmation that their feelings and experiences are valid and shared by others.",
    "The selection suggests they're in a phase of life where they're questioning their current path and seeking guidance.",
    "This type of content sharing often reflects someone who is feeling isolated and seeking connection with like-minded individuals.",
    "The choice indicates they're processing recent life changes and looking for ways to make sense of their new reality.",
    "This repost suggests they're feeling overwhelmed and seeking simple, relatable content that provides comfort.",
    "The content selection reveals someone who is actively working on personal development and seeking supportive content.",
];

pub const CURRENT_MINDSETS: [&str; 10] = [
    "They may be going through a period of introspection or change, using social media as a way to express and understand their emotional state.",
    "They appear to be in a state of emotional openness, willing to share content that reflects their inner thoughts and feelings.",
    "They seem to be in a proactive, growth-oriented state of mind, looking for content that supports their personal development journey.",
    "They're likely feeling vulnerable and seeking reassurance that their experiences and emotions are normal and shared by others.",
    "They appear to be in a transitional phase, using social media to explore new perspectives and possibilities.",
    "They seem to be feeling disconnected from their usual support systems and are seeking connection through shared content.",
    "They're likely experiencing a period of heightened self-awareness and are more conscious of their emotional responses.",
    "They appear to be feeling optimistic about their future and are seeking content that reinforces their positive outlook.",
    "They seem to be processing past experiences and using social media as a way to work through unresolved emotions.",
    "They're likely feeling inspired and motivated, actively seeking content that aligns with their current aspirations.",
];

pub const HASHTAG_THEMES: [&str; 5] = [
    "The hashtags suggest they're interested in specific themes that resonate with their current life situation.",
    "The hashtag choices reveal what topics are most important to them right now.",
    "The hashtags indicate they're seeking content within particular communities or interest areas.",
    "The hashtag selection shows they're exploring new interests and expanding their social circles.",
    "The hashtags reveal they're connecting with specific communities that align with their current values.",
];

pub const CAPTION_INSIGHTS: [&str; 5] = [
    "The caption choice suggests they're carefully considering how to present themselves to their audience.",
    "The caption reveals they're thinking about how their content might be perceived by others.",
    "The caption indicates they're using this repost as a way to communicate something about their current state of mind.",
    "The caption shows they're actively engaging with content that resonates with their personal experiences.",
    "The caption suggests they're seeking validation or connection through shared experiences.",
];

pub const AUDIO_INSIGHTS: [&str; 3] = [
    "The audio choice reveals their current musical preferences and emotional state.",
    "The audio selection suggests they're drawn to content that matches their current mood.",
    "The audio indicates they're connecting with content that has emotional resonance for them.",
];

/// Synthesizes an analysis using the thread-local random generator.
pub fn synthesize(content: &StructuredContent) -> String {
    synthesize_with_rng(content, &mut rand::rng())
}

/// Synthesizes an analysis drawing every choice from `rng`.
///
/// Any caption longer than ten characters earns a note, placeholder or not.
/// Audio only does when it is a real label.
pub fn synthesize_with_rng<R: Rng + ?Sized>(content: &StructuredContent, rng: &mut R) -> String {
    let tone = pick(&EMOTIONAL_TONES, rng);
    let reasoning = pick(&PSYCHOLOGICAL_REASONINGS, rng);
    let mindset = pick(&CURRENT_MINDSETS, rng);

    let mut notes = String::new();
    if !content.hashtags.is_empty() {
        notes.push(' ');
        notes.push_str(pick(&HASHTAG_THEMES, rng));
    }
    if content.caption.chars().count() > CAPTION_NOTE_MIN_CHARS {
        notes.push(' ');
        notes.push_str(pick(&CAPTION_INSIGHTS, rng));
    }
    if content.has_audio() && content.audio.chars().count() > AUDIO_NOTE_MIN_CHARS {
        notes.push(' ');
        notes.push_str(pick(&AUDIO_INSIGHTS, rng));
    }

    format!(
        "{TONE_LABEL} {tone}{notes}\n\n{REASONING_LABEL} {reasoning}\n\n{MINDSET_LABEL} {mindset}"
    )
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

//! # Repostly HTML Extraction
//!
//! Recovers a caption, hashtags and an audio label from the raw HTML of a
//! video page. Captions and audio labels are found with ordered rule lists
//! where the first rule that yields a long enough capture wins. When no rule
//! produces a caption, two looser tiers are tried: the longest generic `"text"`
//! field, then the first long `content` attribute of a `<meta>` tag.
//!
//! Extraction never fails. A page with no recognizable signal produces an
//! empty [`ContentDraft`], which finalizes to the placeholder record.

use regex::Regex;
use repostly::{
    hashtags::HashtagCollector,
    types::CAPTION_NOT_FOUND,
    ContentDraft, StructuredContent,
};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Post-processes a raw capture into its final form.
pub type Normalizer = fn(&str) -> String;

/// One entry in an ordered extraction list.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    /// The capture must be strictly longer than this many characters.
    min_len: usize,
    normalize: Normalizer,
}

impl PatternRule {
    /// Compiles a rule. The pattern's first capture group holds the value.
    pub fn new(pattern: &str, min_len: usize, normalize: Normalizer) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            min_len,
            normalize,
        })
    }

    /// Applies the rule to `html`, using only its first match.
    pub fn apply(&self, html: &str) -> Option<String> {
        let raw = self.regex.captures(html)?.get(1)?.as_str();
        if raw.chars().count() <= self.min_len {
            return None;
        }
        let value = (self.normalize)(raw);
        (!value.is_empty()).then_some(value)
    }
}

/// Evaluates `rules` in order and returns the first value produced.
pub fn first_match(rules: &[PatternRule], html: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(html))
}

// --- Normalizers ---

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Unescapes JSON-escaped newlines, tabs and quotes, then collapses whitespace.
pub fn normalize_caption(raw: &str) -> String {
    let unescaped = raw
        .replace(r"\n", " ")
        .replace(r#"\""#, "\"")
        .replace(r"\t", " ");
    WHITESPACE_RE.replace_all(&unescaped, " ").trim().to_string()
}

/// Unescapes quotes and newlines, then trims.
pub fn normalize_label(raw: &str) -> String {
    raw.replace(r#"\""#, "\"")
        .replace(r"\n", " ")
        .trim()
        .to_string()
}

// --- Default rule tables ---

const CAPTION_MIN_LEN: usize = 5;
const AUDIO_MIN_LEN: usize = 2;
const META_CONTENT_MIN_LEN: usize = 20;

const CAPTION_PATTERNS: [&str; 8] = [
    r#""desc":"([^"]+)""#,
    r#""description":"([^"]+)""#,
    r#""text":"([^"]+)""#,
    r#""shareMeta":\s*\{[^}]*"title":\s*"([^"]+)""#,
    r#"<meta property="og:description" content="([^"]+)""#,
    r#"<meta name="description" content="([^"]+)""#,
    r#""itemInfo":\s*\{[^}]*"text":\s*"([^"]+)""#,
    r#""video":\s*\{[^}]*"desc":\s*"([^"]+)""#,
];

const AUDIO_PATTERNS: [&str; 6] = [
    r#""musicName":"([^"]+)""#,
    r#""music":\s*\{[^}]*"title":\s*"([^"]+)"\}"#,
    r#""audio":\s*\{[^}]*"name":\s*"([^"]+)"\}"#,
    r#""sound":\s*\{[^}]*"title":\s*"([^"]+)"\}"#,
    r#""musicMeta":\s*\{[^}]*"musicName":\s*"([^"]+)"\}"#,
    r#"<meta property="og:audio:title" content="([^"]+)""#,
];

/// JSON arrays whose contents are scanned for additional hashtags.
const HASHTAG_ARRAY_PATTERNS: [&str; 4] = [
    r#""hashtags":\s*\[([^\]]+)\]"#,
    r#""challenges":\s*\[([^\]]+)\]"#,
    r#""tags":\s*\[([^\]]+)\]"#,
    r#""hashtagList":\s*\[([^\]]+)\]"#,
];

const TEXT_FIELD_PATTERN: &str = r#""text":\s*"([^"]{10,})""#;

fn compile_rules(patterns: &[&str], min_len: usize, normalize: Normalizer) -> Vec<PatternRule> {
    patterns
        .iter()
        .map(|p| PatternRule::new(p, min_len, normalize).expect("built-in pattern is valid"))
        .collect()
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in pattern is valid"))
        .collect()
}

pub fn default_caption_rules() -> Vec<PatternRule> {
    compile_rules(&CAPTION_PATTERNS, CAPTION_MIN_LEN, normalize_caption)
}

pub fn default_audio_rules() -> Vec<PatternRule> {
    compile_rules(&AUDIO_PATTERNS, AUDIO_MIN_LEN, normalize_label)
}

static DEFAULT_EXTRACTOR: LazyLock<HtmlExtractor> = LazyLock::new(HtmlExtractor::default);

static META_CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[content]").expect("meta selector is valid"));

// --- Extractor ---

/// The configured extraction rules for video page HTML.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    caption_rules: Vec<PatternRule>,
    audio_rules: Vec<PatternRule>,
    hashtag_arrays: Vec<Regex>,
    text_field: Regex,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::with_rules(default_caption_rules(), default_audio_rules())
    }
}

impl HtmlExtractor {
    /// Builds an extractor with custom caption and audio rule lists.
    /// The hashtag and fallback tiers are always the built-in ones.
    pub fn with_rules(caption_rules: Vec<PatternRule>, audio_rules: Vec<PatternRule>) -> Self {
        Self {
            caption_rules,
            audio_rules,
            hashtag_arrays: compile(&HASHTAG_ARRAY_PATTERNS),
            text_field: Regex::new(TEXT_FIELD_PATTERN).expect("built-in pattern is valid"),
        }
    }

    /// The shared extractor with the built-in rules.
    pub fn shared() -> &'static HtmlExtractor {
        &DEFAULT_EXTRACTOR
    }

    /// Extracts whatever signal the page carries, without placeholders.
    pub fn extract_draft(&self, html: &str) -> ContentDraft {
        let caption = first_match(&self.caption_rules, html)
            .or_else(|| self.longest_text_field(html))
            .or_else(|| first_long_meta_content(html));
        let hashtags = self.hashtags(html);
        let audio = first_match(&self.audio_rules, html);

        debug!(
            caption_found = caption.is_some(),
            hashtags = hashtags.len(),
            audio_found = audio.is_some(),
            "Extracted content from HTML"
        );

        ContentDraft {
            caption,
            hashtags,
            audio,
        }
    }

    /// Extracts a complete record, filling missing fields with placeholders.
    pub fn extract(&self, html: &str) -> StructuredContent {
        self.extract_draft(html).finalize(CAPTION_NOT_FOUND)
    }

    /// Inline `#word` matches first, then tags listed in known JSON arrays.
    fn hashtags(&self, html: &str) -> Vec<String> {
        let mut collector = HashtagCollector::new();
        collector.extend_from_text(html);
        for array in &self.hashtag_arrays {
            if collector.is_full() {
                break;
            }
            if let Some(inner) = array.captures(html).and_then(|c| c.get(1)) {
                collector.extend_from_text(inner.as_str());
            }
        }
        collector.into_vec()
    }

    /// The longest generic `"text"` field; the first one wins a tie.
    fn longest_text_field(&self, html: &str) -> Option<String> {
        let mut longest: Option<&str> = None;
        for caps in self.text_field.captures_iter(html) {
            let Some(m) = caps.get(1) else { continue };
            if longest.map_or(true, |l| m.as_str().len() > l.len()) {
                longest = Some(m.as_str());
            }
        }
        longest
            .map(normalize_label)
            .filter(|caption| !caption.is_empty())
    }
}

/// The first `<meta content>` value longer than the minimum, trimmed.
fn first_long_meta_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&META_CONTENT_SELECTOR)
        .filter_map(|meta| meta.value().attr("content"))
        .find(|content| content.chars().count() > META_CONTENT_MIN_LEN)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Extracts a draft using the built-in rules.
pub fn extract_draft(html: &str) -> ContentDraft {
    HtmlExtractor::shared().extract_draft(html)
}

/// Extracts a complete record using the built-in rules.
pub fn extract_structured_content(html: &str) -> StructuredContent {
    HtmlExtractor::shared().extract(html)
}

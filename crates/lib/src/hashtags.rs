//! # Hashtag Collection
//!
//! Both extraction paths recover hashtags with the same lexical rule: a `#`
//! followed by one or more word characters. The collector keeps the first
//! occurrence of each tag and stops at [`MAX_HASHTAGS`].

use crate::types::MAX_HASHTAGS;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"));

/// Iterates over every hashtag in `text`, in source order, duplicates included.
pub fn hashtag_matches(text: &str) -> impl Iterator<Item = &str> {
    HASHTAG_RE.find_iter(text).map(|m| m.as_str())
}

/// An insertion-ordered, deduplicating, capped set of hashtags.
#[derive(Debug, Clone, Default)]
pub struct HashtagCollector {
    tags: Vec<String>,
    seen: HashSet<String>,
}

impl HashtagCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag unless it was already seen or the collector is full.
    /// Returns `true` when the tag was added.
    pub fn push(&mut self, tag: &str) -> bool {
        if self.is_full() || self.seen.contains(tag) {
            return false;
        }
        self.seen.insert(tag.to_string());
        self.tags.push(tag.to_string());
        true
    }

    /// Adds every hashtag found in `text`.
    pub fn extend_from_text(&mut self, text: &str) {
        for tag in hashtag_matches(text) {
            if self.is_full() {
                break;
            }
            self.push(tag);
        }
    }

    pub fn is_full(&self) -> bool {
        self.tags.len() >= MAX_HASHTAGS
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

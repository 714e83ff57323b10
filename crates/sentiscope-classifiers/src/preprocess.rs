//! Text normalization and surface feature extraction

use regex::Regex;
use sentiscope_core::{LexiconFeatures, LinguisticCounts, Result, TextFeatures};

/// Normalizes text before it is handed to sentiment collaborators
pub struct TextNormalizer {
    urls: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        let urls = Regex::new(r"http\S+|www\S+|https\S+").map_err(|e| {
            sentiscope_core::Error::internal(format!("Failed to build url matcher: {e}"))
        })?;
        let whitespace = Regex::new(r"\s+").map_err(|e| {
            sentiscope_core::Error::internal(format!("Failed to build whitespace matcher: {e}"))
        })?;
        Ok(Self { urls, whitespace })
    }

    /// Lowercase, strip, drop URL-like substrings, and collapse whitespace
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_urls = self.urls.replace_all(lowered.trim(), "");
        self.whitespace
            .replace_all(&without_urls, " ")
            .trim()
            .to_string()
    }
}

/// Compute surface features of the original (non-normalized) text
pub fn extract_features(
    text: &str,
    sentence_count: usize,
    lexicon: Option<LexiconFeatures>,
    linguistic: Option<LinguisticCounts>,
) -> TextFeatures {
    let length = text.chars().count();
    let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
    let lowered = text.to_lowercase();

    TextFeatures {
        length,
        word_count: text.split_whitespace().count(),
        sentence_count,
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
        uppercase_ratio: if length == 0 {
            0.0
        } else {
            uppercase as f64 / length as f64
        },
        has_hashtags: text.contains('#'),
        has_mentions: text.contains('@'),
        has_urls: lowered.contains("http") || lowered.contains("www"),
        lexicon,
        linguistic,
    }
}

//! Content category classifier
//!
//! Buckets a post into question, call to action, announcement, or plain
//! statement using keyword cues. Cues are substring matches, so `new` also
//! fires inside `renewal`.

use aho_corasick::AhoCorasick;
use sentiscope_core::Result;
use serde::Serialize;
use std::collections::HashSet;

const QUESTION_WORDS: &[&str] = &["what", "when", "where", "who", "why", "how", "which", "whose"];

const CTA_PATTERNS: &[&str] = &[
    "buy",
    "shop",
    "click",
    "visit",
    "sign up",
    "subscribe",
    "download",
    "learn more",
    "get started",
    "try now",
    "order",
    "purchase",
    "call",
    "contact",
];

const ANNOUNCEMENT_PATTERNS: &[&str] = &[
    "announcing",
    "introducing",
    "new",
    "launch",
    "release",
    "coming soon",
    "we are pleased",
    "excited to",
];

/// Confidence reported for the statement fallback
const STATEMENT_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Question,
    CallToAction,
    Announcement,
    Statement,
    /// Empty input
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScores {
    pub question_score: f64,
    pub cta_score: f64,
    pub announcement_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVerdict {
    pub category: ContentCategory,
    pub confidence: f64,
    /// Absent for empty input; serialized as `{}`
    #[serde(serialize_with = "serialize_scores")]
    pub features: Option<CategoryScores>,
}

pub struct ContentCategoryClassifier {
    cta: AhoCorasick,
    announcement: AhoCorasick,
}

impl ContentCategoryClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cta: build_matcher(CTA_PATTERNS, "call-to-action")?,
            announcement: build_matcher(ANNOUNCEMENT_PATTERNS, "announcement")?,
        })
    }

    pub fn classify(&self, text: &str) -> CategoryVerdict {
        if text.is_empty() {
            return CategoryVerdict {
                category: ContentCategory::Other,
                confidence: 0.0,
                features: None,
            };
        }

        let lowered = text.to_lowercase();
        let stripped = lowered.trim();

        let has_question_mark = text.contains('?');
        let starts_with_question = QUESTION_WORDS
            .iter()
            .any(|word| stripped.strip_prefix(word).is_some_and(|rest| rest.starts_with(' ')));
        let question_score =
            0.5 * f64::from(u8::from(has_question_mark)) + 0.5 * f64::from(u8::from(starts_with_question));

        let cta_score = (distinct_matches(&self.cta, &lowered) as f64 / 3.0).min(1.0);
        let announcement_score =
            (distinct_matches(&self.announcement, &lowered) as f64 / 2.0).min(1.0);

        let (category, confidence) = if question_score > 0.5 {
            (ContentCategory::Question, question_score)
        } else if cta_score > 0.3 {
            (ContentCategory::CallToAction, cta_score)
        } else if announcement_score > 0.3 {
            (ContentCategory::Announcement, announcement_score)
        } else {
            (ContentCategory::Statement, STATEMENT_CONFIDENCE)
        };

        CategoryVerdict {
            category,
            confidence,
            features: Some(CategoryScores {
                question_score,
                cta_score,
                announcement_score,
            }),
        }
    }
}

fn build_matcher(patterns: &[&str], what: &str) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .map_err(|e| {
            sentiscope_core::Error::internal(format!("Failed to build {what} matcher: {e}"))
        })
}

/// Number of distinct patterns occurring anywhere in `text`
fn distinct_matches(matcher: &AhoCorasick, text: &str) -> usize {
    matcher
        .find_overlapping_iter(text)
        .map(|m| m.pattern())
        .collect::<HashSet<_>>()
        .len()
}

fn serialize_scores<S: serde::Serializer>(
    scores: &Option<CategoryScores>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    match scores {
        Some(scores) => scores.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ContentCategoryClassifier {
        ContentCategoryClassifier::new().unwrap()
    }

    #[test]
    fn test_question() {
        let verdict = classifier().classify("How do I reset my password?");
        assert_eq!(verdict.category, ContentCategory::Question);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_question_mark_alone_is_not_enough() {
        let verdict = classifier().classify("Is this thing on?");
        assert_eq!(verdict.features.unwrap().question_score, 0.5);
        assert_eq!(verdict.category, ContentCategory::Statement);
    }

    #[test]
    fn test_question_word_needs_trailing_space() {
        let verdict = classifier().classify("Whoever said that was right");
        assert_eq!(verdict.features.unwrap().question_score, 0.0);
    }

    #[test]
    fn test_call_to_action() {
        let verdict = classifier().classify("Shop now and subscribe for deals. Click the link!");
        assert_eq!(verdict.category, ContentCategory::CallToAction);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_repeated_pattern_counts_once() {
        let verdict = classifier().classify("buy buy buy");
        let scores = verdict.features.unwrap();
        assert!((scores.cta_score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(verdict.category, ContentCategory::CallToAction);
    }

    #[test]
    fn test_announcement() {
        let verdict = classifier().classify("Introducing our new app, launching today");
        assert_eq!(verdict.category, ContentCategory::Announcement);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_statement_and_empty() {
        let verdict = classifier().classify("The weather is mild today");
        assert_eq!(verdict.category, ContentCategory::Statement);
        assert_eq!(verdict.confidence, 0.6);

        let empty = classifier().classify("");
        assert_eq!(empty.category, ContentCategory::Other);
        assert_eq!(empty.features, None);
        assert_eq!(serde_json::to_value(&empty).unwrap()["features"], serde_json::json!({}));
    }
}

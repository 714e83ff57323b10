//! Word-polarity sentiment analyzer
//!
//! Averages the polarity and subjectivity of opinion words, the way pattern
//! and TextBlob do: intensifiers scale the following adjective, negation
//! halves and flips it.

use crate::collaborator::SentimentCollaborator;
use sentiscope_core::{Classification, ModelJudgment, ModelKind, Result};
use std::collections::HashMap;

/// Polarity beyond which a text counts as positive or negative
pub const POLARITY_THRESHOLD: f64 = 0.1;

const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const OPINION_WORDS: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("happy", 0.8, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("brilliant", 0.9, 1.0),
    ("cool", 0.35, 0.65),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("excited", 0.4, 0.75),
    ("exciting", 0.3, 0.8),
    ("incredible", 0.9, 0.9),
    ("impressive", 1.0, 1.0),
    ("helpful", 0.5, 0.5),
    ("easy", 0.43, 0.83),
    ("useful", 0.3, 0.0),
    ("favorite", 0.5, 1.0),
    ("interesting", 0.5, 0.5),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("disappointed", -0.75, 0.75),
    ("disappointing", -0.6, 0.7),
    ("poor", -0.4, 0.6),
    ("broken", -0.4, 0.4),
    ("useless", -0.5, 0.0),
    ("annoying", -0.8, 0.9),
    ("boring", -1.0, 1.0),
    ("stupid", -0.8, 1.0),
    ("ugly", -0.7, 1.0),
    ("wrong", -0.5, 0.9),
    ("slow", -0.3, 0.4),
    ("rude", -0.3, 0.6),
    ("pathetic", -1.0, 1.0),
    ("disgusting", -1.0, 1.0),
    ("unacceptable", -0.5, 0.5),
];

/// (word, multiplier applied to the next opinion word)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("absolutely", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.3),
    ("super", 1.3),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.6),
    ("little", 0.5),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "dont", "cannot", "isnt", "wasnt"];

/// Polarity and subjectivity of a text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityReading {
    /// Mean polarity in [-1, 1]
    pub polarity: f64,
    /// Mean subjectivity in [0, 1]
    pub subjectivity: f64,
}

/// Pattern-style polarity analyzer
pub struct PolarityAnalyzer {
    opinions: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl PolarityAnalyzer {
    pub fn new() -> Self {
        Self {
            opinions: OPINION_WORDS
                .iter()
                .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Read the polarity of a text
    pub fn reading(&self, text: &str) -> PolarityReading {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut assessments = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.opinions.get(word.as_str()) else {
                continue;
            };

            let mut j = i;
            if let Some(&multiplier) = i
                .checked_sub(1)
                .and_then(|p| self.intensifiers.get(words[p].as_str()))
            {
                polarity *= multiplier;
                subjectivity *= multiplier;
                j = i - 1;
            }

            if j.checked_sub(1).is_some_and(|p| is_negation(&words[p])) {
                polarity *= NEGATION_FACTOR;
            }

            assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
        }

        if assessments.is_empty() {
            return PolarityReading {
                polarity: 0.0,
                subjectivity: 0.0,
            };
        }

        let n = assessments.len() as f64;
        PolarityReading {
            polarity: assessments.iter().map(|(p, _)| p).sum::<f64>() / n,
            subjectivity: assessments.iter().map(|(_, s)| s).sum::<f64>() / n,
        }
    }
}

impl Default for PolarityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentCollaborator for PolarityAnalyzer {
    fn judge(&self, text: &str) -> Result<ModelJudgment> {
        let reading = self.reading(text);
        let classification = if reading.polarity > POLARITY_THRESHOLD {
            Classification::Positive
        } else if reading.polarity < -POLARITY_THRESHOLD {
            Classification::Negative
        } else {
            Classification::Neutral
        };

        Ok(ModelJudgment::new(
            ModelKind::Polarity,
            classification,
            reading.polarity.abs(),
            reading.polarity,
        )
        .with_subjectivity(reading.subjectivity))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Polarity
    }
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

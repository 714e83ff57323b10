//! Valence-lexicon sentiment analyzer
//!
//! Wraps the VADER (Valence Aware Dictionary and sEntiment Reasoner)
//! analyzer, which is tuned for short social posts. An optional overlay of
//! custom terms nudges the compound score for vocabulary VADER's general
//! lexicon does not know.
//!
//! This collaborator is always registered and never needs network or model
//! files, so the ensemble can fall back to it when everything else is down.

use crate::collaborator::SentimentCollaborator;
use sentiscope_core::{
    Classification, ModelJudgment, ModelKind, PolarityScores, Proportions, Result,
};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound threshold separating neutral from polar verdicts
pub const COMPOUND_THRESHOLD: f64 = 0.05;

/// Largest magnitude on VADER's valence scale
const MAX_VALENCE: f64 = 4.0;

/// Share of the overlay valence added to the VADER compound
const OVERLAY_WEIGHT: f64 = 0.5;

/// VADER analyzer plus custom term overlay
pub struct LexiconAnalyzer {
    analyzer: SentimentIntensityAnalyzer<'static>,
    overlay: HashMap<String, f64>,
}

impl LexiconAnalyzer {
    /// Create an analyzer with VADER's bundled lexicon
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
            overlay: HashMap::new(),
        }
    }

    /// Create an analyzer whose overlay is read from a lexicon file.
    ///
    /// The file uses VADER's layout: one entry per line, token and mean
    /// valence (-4..4) separated by a tab, trailing columns ignored.
    pub fn with_lexicon_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut analyzer = Self::new();
        let added = analyzer.extend_from_str(&content)?;
        debug!("Loaded {} lexicon entries from {}", added, path.display());
        Ok(analyzer)
    }

    /// Merge lexicon lines into the overlay, returning how many were read
    pub fn extend_from_str(&mut self, content: &str) -> Result<usize> {
        let mut added = 0;
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            let (Some(token), Some(valence)) = (columns.next(), columns.next()) else {
                return Err(sentiscope_core::Error::config(format!(
                    "Malformed lexicon line {}: expected token and valence",
                    line_no + 1
                )));
            };
            let valence: f64 = valence.trim().parse().map_err(|e| {
                sentiscope_core::Error::config(format!(
                    "Invalid valence on lexicon line {}: {e}",
                    line_no + 1
                ))
            })?;
            self.overlay.insert(
                token.trim().to_lowercase(),
                valence.clamp(-MAX_VALENCE, MAX_VALENCE),
            );
            added += 1;
        }
        Ok(added)
    }

    /// Number of custom overlay entries
    pub fn len(&self) -> usize {
        self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_empty()
    }

    /// Score a text
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        if text.trim().is_empty() {
            return PolarityScores::neutral();
        }

        let scores = self.analyzer.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        let proportions = Proportions {
            pos: score("pos"),
            neu: score("neu"),
            neg: score("neg"),
        };
        let proportions = if proportions.pos + proportions.neu + proportions.neg > 0.0 {
            proportions
        } else {
            Proportions::neutral()
        };

        let compound = score("compound") + OVERLAY_WEIGHT * self.overlay_boost(text);
        PolarityScores {
            compound: compound.clamp(-1.0, 1.0),
            proportions,
        }
    }

    /// Sum of overlay valences for the tokens in `text`, on a -1..1 scale per hit
    fn overlay_boost(&self, text: &str) -> f64 {
        if self.overlay.is_empty() {
            return 0.0;
        }
        text.split_whitespace()
            .map(|raw| {
                raw.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter_map(|token| self.overlay.get(&token))
            .map(|valence| valence / MAX_VALENCE)
            .sum()
    }
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentCollaborator for LexiconAnalyzer {
    fn judge(&self, text: &str) -> Result<ModelJudgment> {
        let scores = self.polarity_scores(text);
        Ok(ModelJudgment::new(
            ModelKind::Lexicon,
            classify_compound(scores.compound),
            scores.compound.abs(),
            scores.compound,
        )
        .with_proportions(scores.proportions))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Lexicon
    }
}

/// Map a compound score onto a class using the lexicon thresholds
pub fn classify_compound(compound: f64) -> Classification {
    if compound >= COMPOUND_THRESHOLD {
        Classification::Positive
    } else if compound <= -COMPOUND_THRESHOLD {
        Classification::Negative
    } else {
        Classification::Neutral
    }
}

//! Sentiment data model shared by the scorer and the recommendation engine

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Three-way sentiment verdict.
///
/// Variant order is significant: when two classes tie during fusion the
/// earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Positive,
    Neutral,
    Negative,
}

impl Classification {
    /// All classes in tie-break order
    pub const ALL: [Classification; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Index into per-class accumulators
    pub fn index(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Neutral => 1,
            Self::Negative => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known sentiment model families.
///
/// Each family carries a fixed fusion weight; anything not recognized falls
/// into `Other` and gets the fallback weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    /// Transformer sequence classifier behind an inference backend
    Transformer,
    /// Valence-lexicon scorer (VADER style), the guaranteed fallback
    Lexicon,
    /// Word-polarity scorer (pattern/TextBlob style)
    Polarity,
    /// Any other registered collaborator
    Other(String),
}

impl ModelKind {
    pub const TRANSFORMER_WEIGHT: f64 = 0.5;
    pub const LEXICON_WEIGHT: f64 = 0.3;
    pub const POLARITY_WEIGHT: f64 = 0.2;
    pub const FALLBACK_WEIGHT: f64 = 0.1;

    /// Fusion weight for this model family
    pub fn weight(&self) -> f64 {
        match self {
            Self::Transformer => Self::TRANSFORMER_WEIGHT,
            Self::Lexicon => Self::LEXICON_WEIGHT,
            Self::Polarity => Self::POLARITY_WEIGHT,
            Self::Other(_) => Self::FALLBACK_WEIGHT,
        }
    }

    /// Name reported in `model_results` and `models_used`
    pub fn name(&self) -> &str {
        match self {
            Self::Transformer => "transformer",
            Self::Lexicon => "vader",
            Self::Polarity => "textblob",
            Self::Other(name) => name,
        }
    }

    /// Parse a reported model name back into its family
    pub fn from_name(name: &str) -> Self {
        match name {
            "transformer" => Self::Transformer,
            "vader" | "lexicon" => Self::Lexicon,
            "textblob" | "polarity" => Self::Polarity,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ModelKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ModelKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Positive/neutral/negative proportions of a text, summing to ~1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

impl Proportions {
    /// Proportions of a text with no sentiment-bearing tokens
    pub fn neutral() -> Self {
        Self {
            pos: 0.0,
            neu: 1.0,
            neg: 0.0,
        }
    }
}

/// Full output of the lexicon analyzer for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub compound: f64,
    #[serde(flatten)]
    pub proportions: Proportions,
}

impl PolarityScores {
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            proportions: Proportions::neutral(),
        }
    }
}

/// One collaborator's verdict on a text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelJudgment {
    pub classification: Classification,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Signed polarity in [-1, 1]
    pub compound: f64,

    /// Lexicon proportions, when the collaborator produces them
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub proportions: Option<Proportions>,

    /// Subjectivity in [0, 1], when the collaborator produces it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjectivity: Option<f64>,

    pub model: ModelKind,
}

impl ModelJudgment {
    /// Create a judgment, clamping scores into their valid ranges
    pub fn new(
        model: ModelKind,
        classification: Classification,
        confidence: f64,
        compound: f64,
    ) -> Self {
        Self {
            classification,
            confidence: clamp_unit(confidence),
            compound: clamp_signed(compound),
            proportions: None,
            subjectivity: None,
            model,
        }
    }

    /// Neutral judgment with zero confidence
    pub fn neutral(model: ModelKind) -> Self {
        Self::new(model, Classification::Neutral, 0.0, 0.0)
    }

    pub fn with_proportions(mut self, proportions: Proportions) -> Self {
        self.proportions = Some(proportions);
        self
    }

    pub fn with_subjectivity(mut self, subjectivity: f64) -> Self {
        self.subjectivity = Some(clamp_unit(subjectivity));
        self
    }
}

/// Lexicon scores of the original text, reported alongside the features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexiconFeatures {
    pub vader_compound: f64,
    pub vader_pos: f64,
    pub vader_neu: f64,
    pub vader_neg: f64,
}

impl From<PolarityScores> for LexiconFeatures {
    fn from(scores: PolarityScores) -> Self {
        Self {
            vader_compound: scores.compound,
            vader_pos: scores.proportions.pos,
            vader_neu: scores.proportions.neu,
            vader_neg: scores.proportions.neg,
        }
    }
}

/// Part-of-speech and entity counts from a linguistic annotator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticCounts {
    pub noun_count: usize,
    pub verb_count: usize,
    pub adjective_count: usize,
    pub adverb_count: usize,
    pub entity_count: usize,
}

/// Surface facts about the analyzed text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFeatures {
    /// Length in characters
    pub length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    /// Share of uppercase characters in [0, 1]
    pub uppercase_ratio: f64,
    pub has_hashtags: bool,
    pub has_mentions: bool,
    pub has_urls: bool,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<LexiconFeatures>,

    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub linguistic: Option<LinguisticCounts>,
}

/// Lexicon verdict for a single sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSentiment {
    pub sentence: String,
    pub classification: Classification,
    pub compound: f64,
}

/// How many models voted for each class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Positive => self.positive += 1,
            Classification::Neutral => self.neutral += 1,
            Classification::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Fused verdict of the ensemble scorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedSentiment {
    pub classification: Classification,
    pub confidence: f64,
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,

    /// Per-sentence lexicon breakdown, in text order
    pub sentences: Vec<SentenceSentiment>,

    /// `None` only for the empty result; serialized as `{}`
    #[serde(serialize_with = "serialize_features")]
    pub features: Option<TextFeatures>,

    /// Every queried model, `None` where it was unavailable or failed
    pub model_results: BTreeMap<ModelKind, Option<ModelJudgment>>,

    pub sentiment_distribution: SentimentDistribution,

    /// Unweighted mean of the per-model confidences
    pub ensemble_confidence: f64,

    /// Models that contributed a judgment, in invocation order
    pub models_used: Vec<ModelKind>,
}

impl FusedSentiment {
    /// Result for empty or whitespace-only text
    pub fn empty() -> Self {
        Self {
            classification: Classification::Neutral,
            confidence: 0.0,
            compound: 0.0,
            pos: 0.0,
            neu: 1.0,
            neg: 0.0,
            sentences: Vec::new(),
            features: None,
            model_results: BTreeMap::new(),
            sentiment_distribution: SentimentDistribution {
                positive: 0,
                neutral: 1,
                negative: 0,
            },
            ensemble_confidence: 0.0,
            models_used: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.models_used.is_empty() && self.features.is_none()
    }

    pub fn word_count(&self) -> usize {
        self.features.as_ref().map_or(0, |f| f.word_count)
    }

    pub fn has_hashtags(&self) -> bool {
        self.features.as_ref().is_some_and(|f| f.has_hashtags)
    }

    /// Sentences the lexicon judged negative, in text order
    pub fn negative_sentences(&self) -> impl Iterator<Item = &SentenceSentiment> {
        self.sentences
            .iter()
            .filter(|s| s.classification == Classification::Negative)
    }
}

fn serialize_features<S: Serializer>(
    features: &Option<TextFeatures>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match features {
        Some(features) => features.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub(crate) fn clamp_signed(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_weights() {
        assert_eq!(ModelKind::Transformer.weight(), 0.5);
        assert_eq!(ModelKind::Lexicon.weight(), 0.3);
        assert_eq!(ModelKind::Polarity.weight(), 0.2);
        assert_eq!(ModelKind::Other("emoji".into()).weight(), 0.1);
    }

    #[test]
    fn test_model_kind_names_roundtrip() {
        for kind in [
            ModelKind::Transformer,
            ModelKind::Lexicon,
            ModelKind::Polarity,
            ModelKind::Other("emoji".into()),
        ] {
            assert_eq!(ModelKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_judgment_clamps_scores() {
        let judgment = ModelJudgment::new(ModelKind::Lexicon, Classification::Positive, 1.7, -3.0);
        assert_eq!(judgment.confidence, 1.0);
        assert_eq!(judgment.compound, -1.0);

        let judgment =
            ModelJudgment::new(ModelKind::Lexicon, Classification::Neutral, f64::NAN, f64::NAN);
        assert_eq!(judgment.confidence, 0.0);
        assert_eq!(judgment.compound, 0.0);
    }

    #[test]
    fn test_empty_result_serialization() {
        let value = serde_json::to_value(FusedSentiment::empty()).unwrap();
        assert_eq!(value["classification"], "neutral");
        assert_eq!(value["neu"], 1.0);
        assert_eq!(value["features"], serde_json::json!({}));
        assert_eq!(value["model_results"], serde_json::json!({}));
        assert_eq!(
            value["sentiment_distribution"],
            serde_json::json!({"positive": 0, "neutral": 1, "negative": 0})
        );
        assert_eq!(value["models_used"], serde_json::json!([]));
    }

    #[test]
    fn test_judgment_serialization_flattens_proportions() {
        let judgment = ModelJudgment::new(ModelKind::Lexicon, Classification::Positive, 0.6, 0.6)
            .with_proportions(Proportions {
                pos: 0.5,
                neu: 0.5,
                neg: 0.0,
            });
        let value = serde_json::to_value(&judgment).unwrap();
        assert_eq!(value["model"], "vader");
        assert_eq!(value["pos"], 0.5);
        assert!(value.get("subjectivity").is_none());
    }

    #[test]
    fn test_model_results_serialize_absent_as_null() {
        let mut sentiment = FusedSentiment::empty();
        sentiment.model_results.insert(ModelKind::Transformer, None);
        let value = serde_json::to_value(&sentiment).unwrap();
        assert!(value["model_results"]["transformer"].is_null());
    }

    #[test]
    fn test_distribution_record() {
        let mut distribution = SentimentDistribution::default();
        distribution.record(Classification::Positive);
        distribution.record(Classification::Negative);
        distribution.record(Classification::Negative);
        assert_eq!(distribution.total(), 3);
        assert_eq!(distribution.negative, 2);
    }
}

//! Rule guard definitions

use crate::context::{AnalysisContext, Platform};
use sentiscope_core::{Classification, FusedSentiment};
use serde::{Deserialize, Serialize};

/// Everything a guard may look at, derived once per request
#[derive(Debug, Clone)]
pub struct Facts<'a> {
    pub classification: Classification,
    pub confidence: f64,
    pub compound: f64,
    pub word_count: usize,
    pub has_hashtags: bool,
    pub platform: Option<Platform>,
    pub sentence_count: usize,
    pub negative_sentences: Vec<&'a str>,
}

impl<'a> Facts<'a> {
    /// Gather facts from a fused result.
    ///
    /// Length and hashtag facts come from the result's features only; a
    /// result without features counts as zero words and no hashtags.
    pub fn gather(sentiment: &'a FusedSentiment, context: Option<&AnalysisContext>) -> Self {
        let (word_count, has_hashtags) = sentiment
            .features
            .as_ref()
            .map_or((0, false), |features| (features.word_count, features.has_hashtags));

        Self {
            classification: sentiment.classification,
            confidence: sentiment.confidence,
            compound: sentiment.compound,
            word_count,
            has_hashtags,
            platform: context.and_then(AnalysisContext::platform),
            sentence_count: sentiment.sentences.len(),
            negative_sentences: sentiment
                .negative_sentences()
                .map(|s| s.sentence.as_str())
                .collect(),
        }
    }
}

/// Open/closed interval test: `above` and `below` are exclusive, `at_most`
/// inclusive. Unset bounds do not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub above: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<f64>,
}

impl Bound {
    pub fn above(value: f64) -> Self {
        Self {
            above: Some(value),
            ..Self::default()
        }
    }

    pub fn below(value: f64) -> Self {
        Self {
            below: Some(value),
            ..Self::default()
        }
    }

    pub fn at_most(mut self, value: f64) -> Self {
        self.at_most = Some(value);
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        self.above.map_or(true, |a| value > a)
            && self.below.map_or(true, |b| value < b)
            && self.at_most.map_or(true, |m| value <= m)
    }
}

/// Condition under which a rule fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// Fused classification, optionally constrained by compound
    Sentiment {
        classification: Classification,

        /// Bound on the signed compound
        #[serde(default, skip_serializing_if = "Option::is_none")]
        compound: Option<Bound>,

        /// Bound on the compound's magnitude
        #[serde(default, skip_serializing_if = "Option::is_none")]
        magnitude: Option<Bound>,
    },

    /// Fused confidence
    Confidence { bound: Bound },

    /// Whitespace-separated word count
    WordCount { bound: Bound },

    /// Presence or absence of `#`
    Hashtags { present: bool },

    /// Publishing platform from the request context
    Platform { platform: Platform },

    /// At least `min_sentences` sentences, one or more judged negative
    NegativeSentences {
        #[serde(default = "default_min_sentences")]
        min_sentences: usize,
    },

    /// Composite guard (AND/OR logic)
    Composite {
        operator: CompositeOperator,
        guards: Vec<Guard>,
    },
}

/// Operator for composite guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOperator {
    And,
    Or,
}

impl Guard {
    /// Conjunction of `guards`
    pub fn all(guards: impl IntoIterator<Item = Guard>) -> Self {
        Self::Composite {
            operator: CompositeOperator::And,
            guards: guards.into_iter().collect(),
        }
    }

    pub fn word_count(bound: Bound) -> Self {
        Self::WordCount { bound }
    }

    pub fn matches(&self, facts: &Facts<'_>) -> bool {
        match self {
            Self::Sentiment {
                classification,
                compound,
                magnitude,
            } => {
                facts.classification == *classification
                    && compound.map_or(true, |b| b.contains(facts.compound))
                    && magnitude.map_or(true, |b| b.contains(facts.compound.abs()))
            }
            Self::Confidence { bound } => bound.contains(facts.confidence),
            Self::WordCount { bound } => bound.contains(facts.word_count as f64),
            Self::Hashtags { present } => facts.has_hashtags == *present,
            Self::Platform { platform } => facts.platform == Some(*platform),
            Self::NegativeSentences { min_sentences } => {
                facts.sentence_count >= *min_sentences && !facts.negative_sentences.is_empty()
            }
            Self::Composite { operator, guards } => match operator {
                CompositeOperator::And => guards.iter().all(|g| g.matches(facts)),
                CompositeOperator::Or => guards.iter().any(|g| g.matches(facts)),
            },
        }
    }
}

fn default_min_sentences() -> usize {
    2
}

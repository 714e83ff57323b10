//! Sentiscope Core
//!
//! Types and error handling shared across Sentiscope components.
//!
//! This crate provides:
//! - The sentiment data model (judgments, features, fused verdicts)
//! - Fixed fusion weights per model family
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Classification, FusedSentiment, LexiconFeatures, LinguisticCounts, ModelJudgment, ModelKind,
    PolarityScores, Proportions, SentenceSentiment, SentimentDistribution, TextFeatures,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Classification, FusedSentiment, ModelJudgment, ModelKind, TextFeatures};
}

//! Collaborator traits consumed by the ensemble scorer

use sentiscope_core::{LinguisticCounts, ModelJudgment, ModelKind, Result};

/// A sentiment model that judges a whole text.
///
/// Implementations must be cheap to share across threads; the scorer holds
/// them behind `Arc` and calls them concurrently from many requests.
pub trait SentimentCollaborator: Send + Sync {
    /// Judge the sentiment of `text`
    fn judge(&self, text: &str) -> Result<ModelJudgment>;

    /// Model family this collaborator implements
    fn kind(&self) -> ModelKind;
}

/// Splits text into sentences
pub trait SentenceSegmenter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Produces part-of-speech and entity counts for a text
pub trait LinguisticAnnotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<LinguisticCounts>;
}

/// Label and score as returned by a text-classification model
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Narrow interface to a transformer sequence classifier.
///
/// Inference itself happens elsewhere (a hosted endpoint, a sidecar); the
/// backend only moves text in and the top label out.
pub trait TextClassificationBackend: Send + Sync {
    fn predict(&self, text: &str) -> Result<LabelScore>;

    /// Model identifier, for logging
    fn model_id(&self) -> &str;
}

impl<T: SentimentCollaborator + ?Sized> SentimentCollaborator for std::sync::Arc<T> {
    fn judge(&self, text: &str) -> Result<ModelJudgment> {
        (**self).judge(text)
    }

    fn kind(&self) -> ModelKind {
        (**self).kind()
    }
}

impl<T: SentenceSegmenter + ?Sized> SentenceSegmenter for std::sync::Arc<T> {
    fn split(&self, text: &str) -> Vec<String> {
        (**self).split(text)
    }
}

impl<T: LinguisticAnnotator + ?Sized> LinguisticAnnotator for std::sync::Arc<T> {
    fn annotate(&self, text: &str) -> Result<LinguisticCounts> {
        (**self).annotate(text)
    }
}

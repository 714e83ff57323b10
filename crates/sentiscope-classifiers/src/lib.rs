//! Sentiscope Classifiers
//!
//! Sentiment collaborators and the ensemble scorer that fuses them.
//!
//! Collaborators fall into three families with fixed fusion weights:
//! - Transformer (0.5): a remote text-classification model
//! - Lexicon (0.3): VADER-style valence lexicon, always present
//! - Polarity (0.2): pattern-based polarity and subjectivity
//!
//! Collaborators are created lazily, at most once, through the
//! [`CollaboratorRegistry`]. A collaborator that fails to initialize stays
//! unavailable and simply stops voting.

pub mod collaborator;
pub mod config;
pub mod content_category;
pub mod ensemble;
pub mod lexicon;
pub mod polarity;
pub mod preprocess;
pub mod registry;
pub mod segmenter;
pub mod transformer;

pub use collaborator::{
    LabelScore, LinguisticAnnotator, SentenceSegmenter, SentimentCollaborator,
    TextClassificationBackend,
};
pub use config::{CollaboratorConfig, LexiconConfig, SegmenterKind, TransformerConfig};
pub use content_category::{
    CategoryScores, CategoryVerdict, ContentCategory, ContentCategoryClassifier,
};
pub use ensemble::{fuse, EnsembleScorer, Fusion};
pub use lexicon::LexiconAnalyzer;
pub use polarity::PolarityAnalyzer;
pub use registry::{Capabilities, CollaboratorRegistry, RegistryBuilder, SharedRegistry};
pub use segmenter::RuleBasedSegmenter;
pub use transformer::{HttpInferenceBackend, TransformerSentiment};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::collaborator::SentimentCollaborator;
    pub use crate::ensemble::EnsembleScorer;
    pub use crate::lexicon::LexiconAnalyzer;
    pub use crate::polarity::PolarityAnalyzer;
    pub use crate::registry::CollaboratorRegistry;
}

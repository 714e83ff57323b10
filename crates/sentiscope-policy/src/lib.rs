//! Sentiscope Recommendation Engine
//!
//! Declarative rules that turn a fused sentiment result into actionable
//! publishing advice.
//!
//! A rule pairs a guard (sentiment, confidence, length, hashtags, platform,
//! sentence negativity) with the recommendation it emits. The built-in rule
//! battery covers crisis response, clarity, length, hashtag strategy, and
//! Facebook/Instagram/YouTube specifics; custom rule sets load from YAML.

pub mod builtin;
pub mod context;
pub mod engine;
pub mod guard;
pub mod recommendation;
pub mod rule;

pub use context::{AnalysisContext, Platform};
pub use engine::RecommendationEngine;
pub use guard::{Bound, CompositeOperator, Facts, Guard};
pub use recommendation::{Priority, Recommendation, RecommendationKind, Urgency};
pub use rule::{DetailSource, Rule, RuleSet, Template};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::context::AnalysisContext;
    pub use crate::engine::RecommendationEngine;
    pub use crate::recommendation::{Priority, Recommendation, RecommendationKind, Urgency};
}

//! Recommendation records emitted by the engine

use serde::{Deserialize, Serialize};

/// Category of advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CrisisManagement,
    Engagement,
    Clarity,
    Optimization,
    Structure,
    Platform,
    ContentImprovement,
}

impl RecommendationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrisisManagement => "crisis_management",
            Self::Engagement => "engagement",
            Self::Clarity => "clarity",
            Self::Optimization => "optimization",
            Self::Structure => "structure",
            Self::Platform => "platform",
            Self::ContentImprovement => "content_improvement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// A single piece of actionable advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,

    pub priority: Priority,

    pub title: String,

    pub description: String,

    /// Suggested steps, in order
    pub actions: Vec<String>,

    pub urgency: Urgency,

    /// Supporting excerpts from the analyzed text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

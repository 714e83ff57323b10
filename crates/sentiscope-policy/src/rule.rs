//! Rule set and rule definitions

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::guard::{Facts, Guard};
use crate::recommendation::{Priority, Recommendation, RecommendationKind, Urgency};

/// Placeholder in a description replaced by the number of negative sentences
pub const NEGATIVE_COUNT_PLACEHOLDER: &str = "{negative_count}";

/// An ordered collection of recommendation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    /// Rules, evaluated in this order
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Load a rule set from a YAML string
    pub fn from_yaml(yaml: &str) -> sentiscope_core::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a rule set from a file
    pub fn from_file(path: impl AsRef<Path>) -> sentiscope_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Rules that are switched on, in evaluation order
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.enabled)
    }
}

/// A single guard-to-advice rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier
    pub name: String,

    pub guard: Guard,

    pub recommendation: Template,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Rule {
    pub fn new(name: impl Into<String>, guard: Guard, recommendation: Template) -> Self {
        Self {
            name: name.into(),
            guard,
            recommendation,
            enabled: true,
        }
    }

    /// The rule's recommendation if its guard holds
    pub fn evaluate(&self, facts: &Facts<'_>) -> Option<Recommendation> {
        self.guard
            .matches(facts)
            .then(|| self.recommendation.render(facts))
    }
}

/// Recommendation a rule emits when it fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,

    pub priority: Priority,

    pub urgency: Urgency,

    pub title: String,

    /// May contain `{negative_count}`
    pub description: String,

    pub actions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DetailSource>,
}

/// Where a recommendation's `details` come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DetailSource {
    /// The first `limit` negative sentences, verbatim
    NegativeSentences { limit: usize },
}

impl Template {
    pub fn render(&self, facts: &Facts<'_>) -> Recommendation {
        let description = if self.description.contains(NEGATIVE_COUNT_PLACEHOLDER) {
            self.description.replace(
                NEGATIVE_COUNT_PLACEHOLDER,
                &facts.negative_sentences.len().to_string(),
            )
        } else {
            self.description.clone()
        };

        let details = self.details.map(|source| match source {
            DetailSource::NegativeSentences { limit } => facts
                .negative_sentences
                .iter()
                .take(limit)
                .map(|s| s.to_string())
                .collect(),
        });

        Recommendation {
            kind: self.kind,
            priority: self.priority,
            title: self.title.clone(),
            description,
            actions: self.actions.clone(),
            urgency: self.urgency,
            details,
        }
    }
}

fn default_true() -> bool {
    true
}

//! Recommendation evaluation engine

use sentiscope_core::{FusedSentiment, Result};
use std::path::Path;
use tracing::debug;

use crate::context::AnalysisContext;
use crate::guard::Facts;
use crate::recommendation::Recommendation;
use crate::rule::RuleSet;

/// Turns a fused sentiment result into ordered recommendations.
///
/// Every enabled rule is checked independently; the output lists the
/// recommendations of all firing rules in rule order, without re-sorting.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: RuleSet,
}

impl RecommendationEngine {
    /// Engine with the built-in rule battery
    pub fn new() -> Self {
        Self::with_rules(RuleSet::builtin())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Load a custom rule set from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rules = RuleSet::from_file(path).map_err(|e| {
            sentiscope_core::Error::config(format!(
                "Failed to load rules from {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::with_rules(rules))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Evaluate all rules against a scored text.
    ///
    /// Every fact is read from `sentiment`; `text` is only logged.
    pub fn recommend(
        &self,
        sentiment: &FusedSentiment,
        text: &str,
        context: Option<&AnalysisContext>,
    ) -> Vec<Recommendation> {
        let facts = Facts::gather(sentiment, context);

        let recommendations: Vec<Recommendation> = self
            .rules
            .enabled()
            .filter_map(|rule| {
                let recommendation = rule.evaluate(&facts)?;
                debug!(rule = %rule.name, "Recommendation rule fired");
                Some(recommendation)
            })
            .collect();

        debug!(
            rule_set = %self.rules.name,
            fired = recommendations.len(),
            word_count = facts.word_count,
            text_chars = text.chars().count(),
            "Recommendations generated"
        );
        recommendations
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

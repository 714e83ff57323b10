//! Combined sentiment and recommendation report

use sentiscope_classifiers::EnsembleScorer;
use sentiscope_core::FusedSentiment;
use sentiscope_policy::{AnalysisContext, Recommendation, RecommendationEngine};
use serde::Serialize;

/// Fused sentiment fields, flattened, plus the recommendations they produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub sentiment: FusedSentiment,

    pub recommendations: Vec<Recommendation>,

    pub recommendation_count: usize,
}

/// Score `text` and derive recommendations; blocking
pub fn analyze(
    scorer: &EnsembleScorer,
    engine: &RecommendationEngine,
    text: &str,
    context: Option<&AnalysisContext>,
) -> AnalysisReport {
    let sentiment = scorer.score(text);
    let recommendations = engine.recommend(&sentiment, text, context);

    for recommendation in &recommendations {
        metrics::counter!("sentiscope_recommendations_total", "type" => recommendation.kind.as_str())
            .increment(1);
    }

    AnalysisReport {
        recommendation_count: recommendations.len(),
        sentiment,
        recommendations,
    }
}

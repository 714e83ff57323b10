//! Ensemble sentiment scoring
//!
//! Every available collaborator judges the normalized text; the judgments
//! are fused by a confidence-weighted vote. Collaborator failures never
//! reach the caller: a failed or missing collaborator simply does not vote.

use crate::collaborator::SentimentCollaborator;
use crate::preprocess::{extract_features, TextNormalizer};
use crate::registry::CollaboratorRegistry;
use sentiscope_core::{
    Classification, FusedSentiment, LexiconFeatures, ModelJudgment, ModelKind, PolarityScores,
    Result, SentenceSentiment, SentimentDistribution,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Outcome of the weighted vote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fusion {
    pub classification: Classification,
    pub confidence: f64,
    pub compound: f64,
}

impl Fusion {
    fn neutral() -> Self {
        Self {
            classification: Classification::Neutral,
            confidence: 0.0,
            compound: 0.0,
        }
    }
}

/// Fuse judgments by confidence-weighted vote.
///
/// Each judgment adds `weight * confidence` to its class and
/// `weight * compound` to the compound sum; both are normalized by the total
/// weight. The strongest class wins, earlier variants of
/// [`Classification`] winning ties.
pub fn fuse(judgments: &[ModelJudgment]) -> Fusion {
    let mut class_scores = [0.0_f64; 3];
    let mut compound_sum = 0.0;
    let mut weight_sum = 0.0;

    for judgment in judgments {
        let weight = judgment.model.weight();
        class_scores[judgment.classification.index()] += weight * judgment.confidence;
        compound_sum += weight * judgment.compound;
        weight_sum += weight;
    }

    if weight_sum <= 0.0 {
        return Fusion::neutral();
    }

    for score in &mut class_scores {
        *score /= weight_sum;
    }
    compound_sum /= weight_sum;

    let mut winner = Classification::Positive;
    for class in Classification::ALL {
        if class_scores[class.index()] > class_scores[winner.index()] {
            winner = class;
        }
    }

    Fusion {
        classification: winner,
        confidence: class_scores[winner.index()].clamp(0.0, 1.0),
        compound: compound_sum.clamp(-1.0, 1.0),
    }
}

/// Scores text with every registered collaborator and fuses the result
pub struct EnsembleScorer {
    registry: Arc<CollaboratorRegistry>,
    normalizer: TextNormalizer,
}

impl EnsembleScorer {
    pub fn new(registry: Arc<CollaboratorRegistry>) -> Result<Self> {
        Ok(Self {
            registry,
            normalizer: TextNormalizer::new()?,
        })
    }

    pub fn registry(&self) -> &CollaboratorRegistry {
        &self.registry
    }

    /// Score a text; never fails
    pub fn score(&self, text: &str) -> FusedSentiment {
        if text.trim().is_empty() {
            return FusedSentiment::empty();
        }

        let start = Instant::now();
        let processed = self.normalizer.normalize(text);

        let mut judgments = Vec::new();
        let mut model_results = BTreeMap::new();

        let transformer = self.optional_judgment(
            &ModelKind::Transformer,
            self.registry.transformer(),
            &processed,
        );
        record(&mut judgments, &mut model_results, ModelKind::Transformer, transformer);

        let lexicon = self.lexicon_judgment(&processed);
        judgments.push(lexicon.clone());
        model_results.insert(ModelKind::Lexicon, Some(lexicon.clone()));

        let polarity =
            self.optional_judgment(&ModelKind::Polarity, self.registry.polarity(), &processed);
        record(&mut judgments, &mut model_results, ModelKind::Polarity, polarity);

        for (kind, collaborator) in self.registry.additional() {
            let judgment = self.optional_judgment(kind, collaborator, &processed);
            record(&mut judgments, &mut model_results, kind.clone(), judgment);
        }

        let fusion = fuse(&judgments);

        let mut sentiment_distribution = SentimentDistribution::default();
        for judgment in &judgments {
            sentiment_distribution.record(judgment.classification);
        }
        let ensemble_confidence =
            judgments.iter().map(|j| j.confidence).sum::<f64>() / judgments.len() as f64;

        let sentences = self.score_sentences(text);
        let features = extract_features(
            text,
            sentences.len(),
            self.lexicon_features(text),
            self.registry.annotator().and_then(|annotator| {
                annotator
                    .annotate(text)
                    .map_err(|e| warn!("Linguistic annotation failed: {}", e))
                    .ok()
            }),
        );

        let proportions = lexicon.proportions;
        let result = FusedSentiment {
            classification: fusion.classification,
            confidence: fusion.confidence,
            compound: fusion.compound,
            pos: proportions.map_or(0.0, |p| p.pos),
            neu: proportions.map_or(0.0, |p| p.neu),
            neg: proportions.map_or(0.0, |p| p.neg),
            sentences,
            features: Some(features),
            model_results,
            sentiment_distribution,
            ensemble_confidence,
            models_used: judgments.iter().map(|j| j.model.clone()).collect(),
        };

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::histogram!("sentiscope_scoring_latency_us").record(latency_us as f64);
        debug!(
            classification = %result.classification,
            confidence = result.confidence,
            compound = result.compound,
            models = result.models_used.len(),
            latency_us,
            "Ensemble scoring complete"
        );

        result
    }

    fn optional_judgment(
        &self,
        kind: &ModelKind,
        collaborator: Option<Arc<dyn SentimentCollaborator>>,
        text: &str,
    ) -> Option<ModelJudgment> {
        let collaborator = collaborator?;
        match collaborator.judge(text) {
            // the slot decides the fusion weight, whatever the collaborator reports
            Ok(judgment) => Some(ModelJudgment {
                model: kind.clone(),
                ..judgment
            }),
            Err(e) => {
                warn!("Collaborator {} failed: {}", kind, e);
                metrics::counter!("sentiscope_collaborator_failures_total", "model" => kind.name().to_string())
                    .increment(1);
                None
            }
        }
    }

    /// The lexicon always votes; neutral when it is unavailable or fails
    fn lexicon_judgment(&self, text: &str) -> ModelJudgment {
        self.optional_judgment(&ModelKind::Lexicon, self.registry.lexicon(), text)
            .unwrap_or_else(|| ModelJudgment::neutral(ModelKind::Lexicon))
    }

    fn lexicon_features(&self, text: &str) -> Option<LexiconFeatures> {
        let judgment = self.registry.lexicon()?.judge(text).ok()?;
        let proportions = judgment.proportions?;
        Some(LexiconFeatures::from(PolarityScores {
            compound: judgment.compound,
            proportions,
        }))
    }

    fn score_sentences(&self, text: &str) -> Vec<SentenceSentiment> {
        let sentences = match self.registry.segmenter() {
            Some(segmenter) => segmenter.split(text),
            None => vec![text.to_string()],
        };

        sentences
            .into_iter()
            .map(|sentence| sentence.trim().to_string())
            .filter(|sentence| !sentence.is_empty())
            .map(|sentence| {
                let judgment = self.lexicon_judgment(&sentence);
                SentenceSentiment {
                    sentence,
                    classification: judgment.classification,
                    compound: judgment.compound,
                }
            })
            .collect()
    }
}

fn record(
    judgments: &mut Vec<ModelJudgment>,
    model_results: &mut BTreeMap<ModelKind, Option<ModelJudgment>>,
    kind: ModelKind,
    judgment: Option<ModelJudgment>,
) {
    if let Some(judgment) = &judgment {
        judgments.push(judgment.clone());
    }
    model_results.insert(kind, judgment);
}

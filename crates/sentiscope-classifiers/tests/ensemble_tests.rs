//! Ensemble scorer integration tests
//!
//! Exercises fusion and failure absorption against mock collaborators, and
//! the scorer's invariants over arbitrary input.


use mock_collaborators::{FailingCollaborator, MockAnnotator, MockCollaborator};
use proptest::prelude::*;
use sentiscope_classifiers::{
    fuse, CollaboratorRegistry, EnsembleScorer, LexiconAnalyzer, PolarityAnalyzer,
    RuleBasedSegmenter,
};
use sentiscope_core::{Classification, FusedSentiment, LinguisticCounts, ModelJudgment, ModelKind};
use std::sync::Arc;

fn scorer(registry: CollaboratorRegistry) -> EnsembleScorer {
    EnsembleScorer::new(Arc::new(registry)).unwrap()
}

fn default_scorer() -> EnsembleScorer {
    scorer(CollaboratorRegistry::with_defaults())
}

#[test]
fn test_single_positive_lexicon() {
    let lexicon = MockCollaborator::new(ModelKind::Lexicon)
        .with_classification(Classification::Positive)
        .with_confidence(0.85)
        .with_compound(0.85)
        .with_proportions(0.6, 0.4, 0.0)
        .into_shared();
    let registry = CollaboratorRegistry::builder()
        .lexicon({
            let lexicon = lexicon.clone();
            move || Ok(lexicon.clone())
        })
        .segmenter(|| Ok(RuleBasedSegmenter::new()))
        .build();

    let result = scorer(registry).score("I absolutely love this! #amazing #great");

    assert_eq!(result.classification, Classification::Positive);
    assert!((result.confidence - 0.85).abs() < 1e-9);
    assert!((result.compound - 0.85).abs() < 1e-9);
    assert_eq!(result.pos, 0.6);
    assert_eq!(result.models_used, vec![ModelKind::Lexicon]);
    assert_eq!(result.sentiment_distribution.positive, 1);
    assert_eq!(result.sentiment_distribution.total(), 1);
    assert!((result.ensemble_confidence - 0.85).abs() < 1e-9);

    // whole text, two sentences, plus the original-text lexicon features
    assert_eq!(lexicon.call_count(), 4);

    let features = result.features.unwrap();
    assert_eq!(features.word_count, 6);
    assert!(features.has_hashtags);
    assert_eq!(features.lexicon.map(|l| l.vader_compound), Some(0.85));
}

#[test]
fn test_failing_transformer_is_absorbed() {
    let registry = CollaboratorRegistry::builder()
        .transformer(|| Ok(FailingCollaborator::new(ModelKind::Transformer).with_error("timeout")))
        .lexicon(|| {
            Ok(MockCollaborator::new(ModelKind::Lexicon)
                .with_classification(Classification::Negative)
                .with_confidence(0.6)
                .with_compound(-0.6))
        })
        .build();

    let result = scorer(registry).score("This was a terrible experience");

    assert_eq!(result.classification, Classification::Negative);
    assert_eq!(result.models_used, vec![ModelKind::Lexicon]);
    assert_eq!(result.model_results.get(&ModelKind::Transformer), Some(&None));
    assert!(result.model_results[&ModelKind::Lexicon].is_some());
}

#[test]
fn test_failed_initialization_is_absorbed() {
    let registry = CollaboratorRegistry::builder()
        .transformer(|| -> sentiscope_core::Result<MockCollaborator> {
            Err(sentiscope_core::Error::http("connection refused"))
        })
        .lexicon(|| Ok(LexiconAnalyzer::new()))
        .build();

    let scorer = scorer(registry);
    let first = scorer.score("Great service");
    let second = scorer.score("Great service");

    assert_eq!(first, second);
    assert_eq!(first.models_used, vec![ModelKind::Lexicon]);
}

#[test]
fn test_missing_lexicon_falls_back_to_neutral() {
    let registry = CollaboratorRegistry::builder()
        .polarity(|| {
            Ok(MockCollaborator::new(ModelKind::Polarity)
                .with_classification(Classification::Negative)
                .with_confidence(0.4)
                .with_compound(-0.4))
        })
        .build();

    let result = scorer(registry).score("meh");

    assert_eq!(result.models_used, vec![ModelKind::Lexicon, ModelKind::Polarity]);
    let lexicon = result.model_results[&ModelKind::Lexicon].as_ref().unwrap();
    assert_eq!(lexicon.classification, Classification::Neutral);
    assert_eq!(lexicon.confidence, 0.0);

    // negative 0.08 / 0.5, neutral 0
    assert_eq!(result.classification, Classification::Negative);
    assert!((result.confidence - 0.16).abs() < 1e-9);
    assert_eq!(result.pos, 0.0);
    assert_eq!(result.neu, 0.0);
    assert!((result.ensemble_confidence - 0.2).abs() < 1e-9);
}

#[test]
fn test_model_results_always_list_core_models() {
    let result = default_scorer().score("Nice weather today");
    for kind in [ModelKind::Transformer, ModelKind::Lexicon, ModelKind::Polarity] {
        assert!(result.model_results.contains_key(&kind), "missing {kind}");
    }
    assert_eq!(result.model_results[&ModelKind::Transformer], None);
}

#[test]
fn test_additional_collaborator_votes_with_fallback_weight() {
    let registry = CollaboratorRegistry::builder()
        .lexicon(|| {
            Ok(MockCollaborator::new(ModelKind::Lexicon)
                .with_classification(Classification::Positive)
                .with_confidence(0.2)
                .with_compound(0.2))
        })
        .additional("emoji", || {
            Ok(MockCollaborator::new(ModelKind::Other("emoji".into()))
                .with_classification(Classification::Negative)
                .with_confidence(1.0)
                .with_compound(-1.0))
        })
        .build();

    let result = scorer(registry).score("🙂 fine");

    // positive 0.06 / 0.4 vs negative 0.1 / 0.4
    assert_eq!(result.classification, Classification::Negative);
    assert_eq!(
        result.models_used,
        vec![ModelKind::Lexicon, ModelKind::Other("emoji".into())]
    );
    assert!(result.model_results[&ModelKind::Other("emoji".into())].is_some());
}

#[test]
fn test_additional_collaborator_is_weighted_by_its_slot() {
    let registry = CollaboratorRegistry::builder()
        .lexicon(|| {
            Ok(MockCollaborator::new(ModelKind::Lexicon)
                .with_classification(Classification::Positive)
                .with_confidence(0.2)
                .with_compound(0.2))
        })
        .additional("emoji", || {
            // reports itself as the polarity model
            Ok(MockCollaborator::new(ModelKind::Polarity)
                .with_classification(Classification::Negative)
                .with_confidence(1.0)
                .with_compound(-1.0))
        })
        .build();

    let result = scorer(registry).score("great day");

    let emoji = ModelKind::Other("emoji".into());
    assert_eq!(result.models_used, vec![ModelKind::Lexicon, emoji.clone()]);
    assert!(!result.models_used.contains(&ModelKind::Polarity));
    assert_eq!(result.model_results[&emoji].as_ref().unwrap().model, emoji);

    // negative 0.1 / 0.4 at the fallback weight, not 0.2 / 0.5
    assert_eq!(result.classification, Classification::Negative);
    assert!((result.confidence - 0.25).abs() < 1e-9);
}

#[test]
fn test_sentiment_free_text_ties_to_positive() {
    let result = default_scorer().score("The meeting is on Tuesday");

    for kind in [ModelKind::Lexicon, ModelKind::Polarity] {
        let judgment = result.model_results[&kind].as_ref().unwrap();
        assert_eq!(judgment.classification, Classification::Neutral);
        assert_eq!(judgment.confidence, 0.0);
    }
    // every class scores zero, and the tie goes to positive
    assert_eq!(result.classification, Classification::Positive);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.compound, 0.0);
    assert_eq!(result.sentiment_distribution.neutral, 2);
}

#[test]
fn test_crisis_text_is_strongly_negative() {
    let result = default_scorer().score("This is a disaster. Customers are furious and outraged.");

    assert_eq!(result.classification, Classification::Negative);
    let lexicon = result.model_results[&ModelKind::Lexicon].as_ref().unwrap();
    assert!(lexicon.compound < -0.5, "lexicon compound was {}", lexicon.compound);
    assert!(result.compound < 0.0);
    assert!(result.neg > result.pos);
}

#[test]
fn test_annotator_counts_reach_features() {
    let counts = LinguisticCounts {
        noun_count: 2,
        verb_count: 1,
        adjective_count: 1,
        adverb_count: 0,
        entity_count: 1,
    };
    let registry = CollaboratorRegistry::builder()
        .lexicon(|| Ok(LexiconAnalyzer::new()))
        .annotator(move || Ok(MockAnnotator { counts }))
        .build();

    let features = scorer(registry).score("Paris is lovely").features.unwrap();
    assert_eq!(features.linguistic, Some(counts));
}

#[test]
fn test_mixed_review_sentences() {
    let result = default_scorer().score("Great product. Terrible delivery. Awful packaging.");

    assert_eq!(result.sentences.len(), 3);
    assert_eq!(result.sentences[0].classification, Classification::Positive);
    let negative: Vec<_> = result.negative_sentences().map(|s| s.sentence.as_str()).collect();
    assert_eq!(negative, vec!["Terrible delivery.", "Awful packaging."]);
    assert_eq!(result.features.unwrap().sentence_count, 3);
}

#[test]
fn test_empty_and_whitespace_text() {
    let scorer = default_scorer();
    for text in ["", "   ", "\n\t"] {
        let result = scorer.score(text);
        assert_eq!(result, FusedSentiment::empty());
        assert_eq!(result.sentiment_distribution.neutral, 1);
    }
}

#[test]
fn test_url_only_text_is_scored() {
    // normalization strips the url, but the text itself is not blank
    let result = default_scorer().score("https://example.com/launch");
    assert!(!result.is_empty());
    assert!(result.features.unwrap().has_urls);
}

#[test]
fn test_concurrent_scoring_initializes_once() {
    let lexicon = MockCollaborator::new(ModelKind::Lexicon)
        .with_classification(Classification::Positive)
        .with_confidence(0.5)
        .with_compound(0.5)
        .into_shared();
    let inits = Arc::new(std::sync::atomic::AtomicU32::new(0));
    let registry = CollaboratorRegistry::builder()
        .lexicon({
            let lexicon = lexicon.clone();
            let inits = inits.clone();
            move || {
                inits.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Ok(lexicon.clone())
            }
        })
        .build();
    let scorer = Arc::new(scorer(registry));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let scorer = scorer.clone();
            std::thread::spawn(move || scorer.score("good stuff").classification)
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Classification::Positive);
    }
    assert_eq!(inits.load(std::sync::atomic::Ordering::SeqCst), 1);
}

fn arb_kind() -> impl Strategy<Value = ModelKind> {
    prop_oneof![
        Just(ModelKind::Transformer),
        Just(ModelKind::Lexicon),
        Just(ModelKind::Polarity),
        "[a-z]{3,8}".prop_map(ModelKind::Other),
    ]
}

fn arb_class() -> impl Strategy<Value = Classification> {
    prop_oneof![
        Just(Classification::Positive),
        Just(Classification::Neutral),
        Just(Classification::Negative),
    ]
}

fn arb_judgment() -> impl Strategy<Value = ModelJudgment> {
    (arb_kind(), arb_class(), 0.0..=1.0f64, -1.0..=1.0f64)
        .prop_map(|(kind, class, confidence, compound)| {
            ModelJudgment::new(kind, class, confidence, compound)
        })
}

proptest! {
    #[test]
    fn prop_fusion_stays_in_range(judgments in prop::collection::vec(arb_judgment(), 0..8)) {
        let fusion = fuse(&judgments);
        prop_assert!((0.0..=1.0).contains(&fusion.confidence));
        prop_assert!((-1.0..=1.0).contains(&fusion.compound));
    }

    #[test]
    fn prop_fusion_winner_has_max_score(judgments in prop::collection::vec(arb_judgment(), 1..8)) {
        let fusion = fuse(&judgments);
        let weight_sum: f64 = judgments.iter().map(|j| j.model.weight()).sum();
        for class in Classification::ALL {
            let score: f64 = judgments
                .iter()
                .filter(|j| j.classification == class)
                .map(|j| j.model.weight() * j.confidence)
                .sum::<f64>() / weight_sum;
            prop_assert!(score <= fusion.confidence + 1e-9);
        }
    }

    #[test]
    fn prop_scorer_invariants(text in "[A-Za-z!?.#@ ]{1,120}") {
        let scorer = default_scorer();
        let result = scorer.score(&text);

        if text.trim().is_empty() {
            prop_assert_eq!(result, FusedSentiment::empty());
        } else {
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert!((-1.0..=1.0).contains(&result.compound));
            prop_assert_eq!(result.sentiment_distribution.total(), result.models_used.len());
            prop_assert_eq!(
                result.models_used.iter().filter(|m| **m == ModelKind::Lexicon).count(),
                1
            );
            let features = result.features.unwrap();
            prop_assert!((0.0..=1.0).contains(&features.uppercase_ratio));
            prop_assert_eq!(features.sentence_count, result.sentences.len());
        }
    }

    #[test]
    fn prop_scoring_is_deterministic(text in "[a-z ]{1,60}") {
        let scorer = scorer(
            CollaboratorRegistry::builder()
                .lexicon(|| Ok(LexiconAnalyzer::new()))
                .polarity(|| Ok(PolarityAnalyzer::new()))
                .build(),
        );
        prop_assert_eq!(scorer.score(&text), scorer.score(&text));
    }
}

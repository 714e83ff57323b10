//! Shared application state

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusHandle;
use sentiscope_classifiers::{CollaboratorRegistry, ContentCategoryClassifier, EnsembleScorer};
use sentiscope_policy::RecommendationEngine;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// Ensemble scorer over the lazily initialized collaborators
    pub scorer: Arc<EnsembleScorer>,

    pub engine: Arc<RecommendationEngine>,

    pub categories: Arc<ContentCategoryClassifier>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> anyhow::Result<Self> {
        let registry = Arc::new(CollaboratorRegistry::from_config(&config.collaborators));
        let capabilities = registry.capabilities();
        info!(
            transformer = capabilities.transformer,
            lexicon = capabilities.lexicon,
            polarity = capabilities.polarity,
            segmenter = capabilities.segmenter,
            "Collaborators configured"
        );

        let scorer = EnsembleScorer::new(registry).context("Failed to create ensemble scorer")?;

        let engine = match &config.recommendation_rules {
            Some(path) => {
                let engine = RecommendationEngine::from_file(path)?;
                info!(
                    "Loaded {} recommendation rules from {}",
                    engine.rules().rules.len(),
                    path.display()
                );
                engine
            }
            None => RecommendationEngine::new(),
        };

        let categories =
            ContentCategoryClassifier::new().context("Failed to create content classifier")?;

        Ok(Self {
            config: Arc::new(config),
            scorer: Arc::new(scorer),
            engine: Arc::new(engine),
            categories: Arc::new(categories),
            metrics_handle,
        })
    }
}

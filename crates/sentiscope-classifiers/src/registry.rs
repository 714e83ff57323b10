//! Collaborator registry initialization and management
//!
//! The registry is built once at startup and shared by reference. Each
//! collaborator lives in a slot holding a factory; the first caller to touch
//! a slot runs the factory, concurrent callers wait for it, and the outcome
//! (a handle, or "unavailable" when the factory failed) is kept for the life
//! of the process.

use crate::collaborator::{LinguisticAnnotator, SentenceSegmenter, SentimentCollaborator};
use crate::config::{CollaboratorConfig, SegmenterKind};
use crate::lexicon::LexiconAnalyzer;
use crate::polarity::PolarityAnalyzer;
use crate::segmenter::RuleBasedSegmenter;
use crate::transformer::{HttpInferenceBackend, TransformerSentiment};
use sentiscope_core::{ModelKind, Result};
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

type Factory<T> = Box<dyn Fn() -> Result<Arc<T>> + Send + Sync>;

/// A lazily initialized collaborator handle
struct Slot<T: ?Sized> {
    name: String,
    factory: Option<Factory<T>>,
    handle: OnceLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Slot<T> {
    fn new(name: impl Into<String>, factory: Option<Factory<T>>) -> Self {
        Self {
            name: name.into(),
            factory,
            handle: OnceLock::new(),
        }
    }

    fn is_configured(&self) -> bool {
        self.factory.is_some()
    }

    /// Initialize on first use; `None` when unconfigured or initialization failed
    fn get(&self) -> Option<Arc<T>> {
        self.handle
            .get_or_init(|| {
                let factory = self.factory.as_ref()?;
                match factory() {
                    Ok(handle) => {
                        info!("✓ Initialized collaborator: {}", self.name);
                        Some(handle)
                    }
                    Err(e) => {
                        warn!("✗ Collaborator {} unavailable: {}", self.name, e);
                        metrics::counter!("sentiscope_collaborator_init_failures_total", "model" => self.name.clone())
                            .increment(1);
                        None
                    }
                }
            })
            .clone()
    }
}

/// Which collaborators are configured, or (after warm-up) available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub transformer: bool,
    pub lexicon: bool,
    pub polarity: bool,
    pub segmenter: bool,
    pub linguistic: bool,
    /// Number of additional sentiment collaborators
    pub additional: usize,
}

/// Registry of sentiment, segmentation, and annotation collaborators
pub struct CollaboratorRegistry {
    transformer: Slot<dyn SentimentCollaborator>,
    lexicon: Slot<dyn SentimentCollaborator>,
    polarity: Slot<dyn SentimentCollaborator>,
    additional: Vec<(ModelKind, Slot<dyn SentimentCollaborator>)>,
    segmenter: Slot<dyn SentenceSegmenter>,
    annotator: Slot<dyn LinguisticAnnotator>,
    capabilities: Capabilities,
}

impl CollaboratorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry with the built-in lexicon, polarity analyzer, and segmenter
    pub fn with_defaults() -> Self {
        Self::from_config(&CollaboratorConfig::default())
    }

    /// Build a registry from configuration
    pub fn from_config(config: &CollaboratorConfig) -> Self {
        let mut builder = Self::builder();

        if config.transformer.is_configured() {
            let transformer = config.transformer.clone();
            builder = builder.transformer(move || {
                let endpoint = transformer.endpoint.clone().ok_or_else(|| {
                    sentiscope_core::Error::config("Transformer endpoint not configured")
                })?;
                let backend = HttpInferenceBackend::new(
                    endpoint,
                    transformer.model.clone(),
                    transformer.api_token(),
                    Duration::from_millis(transformer.timeout_ms),
                )?;
                Ok(TransformerSentiment::new(Arc::new(backend))
                    .with_max_chars(transformer.max_chars))
            });
        }

        if config.lexicon.enabled {
            let lexicon_path = config.lexicon.lexicon_path.clone();
            builder = builder.lexicon(move || match &lexicon_path {
                Some(path) => LexiconAnalyzer::with_lexicon_file(path),
                None => Ok(LexiconAnalyzer::new()),
            });
        }

        if config.polarity.enabled {
            builder = builder.polarity(|| Ok(PolarityAnalyzer::new()));
        }

        if config.segmenter == SegmenterKind::RuleBased {
            builder = builder.segmenter(|| Ok(RuleBasedSegmenter::new()));
        }

        let registry = builder.build();
        info!("Collaborator registry configured: {:?}", registry.capabilities());
        registry
    }

    /// Collaborators configured at startup
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Initialize every configured collaborator and report which are usable
    pub fn warm_up(&self) -> Capabilities {
        let available = Capabilities {
            transformer: self.transformer().is_some(),
            lexicon: self.lexicon().is_some(),
            polarity: self.polarity().is_some(),
            segmenter: self.segmenter().is_some(),
            linguistic: self.annotator().is_some(),
            additional: self
                .additional
                .iter()
                .filter(|(_, slot)| slot.get().is_some())
                .count(),
        };
        info!("Collaborators available: {:?}", available);
        available
    }

    pub fn transformer(&self) -> Option<Arc<dyn SentimentCollaborator>> {
        self.transformer.get()
    }

    pub fn lexicon(&self) -> Option<Arc<dyn SentimentCollaborator>> {
        self.lexicon.get()
    }

    pub fn polarity(&self) -> Option<Arc<dyn SentimentCollaborator>> {
        self.polarity.get()
    }

    /// Additional sentiment collaborators, in registration order
    pub fn additional(
        &self,
    ) -> impl Iterator<Item = (&ModelKind, Option<Arc<dyn SentimentCollaborator>>)> {
        self.additional.iter().map(|(kind, slot)| (kind, slot.get()))
    }

    pub fn segmenter(&self) -> Option<Arc<dyn SentenceSegmenter>> {
        self.segmenter.get()
    }

    pub fn annotator(&self) -> Option<Arc<dyn LinguisticAnnotator>> {
        self.annotator.get()
    }
}

/// Builder for [`CollaboratorRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    transformer: Option<Factory<dyn SentimentCollaborator>>,
    lexicon: Option<Factory<dyn SentimentCollaborator>>,
    polarity: Option<Factory<dyn SentimentCollaborator>>,
    additional: Vec<(ModelKind, Factory<dyn SentimentCollaborator>)>,
    segmenter: Option<Factory<dyn SentenceSegmenter>>,
    annotator: Option<Factory<dyn LinguisticAnnotator>>,
}

impl RegistryBuilder {
    pub fn transformer<C, F>(mut self, factory: F) -> Self
    where
        C: SentimentCollaborator + 'static,
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        self.transformer = Some(sentiment_factory(factory));
        self
    }

    pub fn lexicon<C, F>(mut self, factory: F) -> Self
    where
        C: SentimentCollaborator + 'static,
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        self.lexicon = Some(sentiment_factory(factory));
        self
    }

    pub fn polarity<C, F>(mut self, factory: F) -> Self
    where
        C: SentimentCollaborator + 'static,
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        self.polarity = Some(sentiment_factory(factory));
        self
    }

    /// Register an extra sentiment collaborator, weighted as [`ModelKind::Other`]
    pub fn additional<C, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        C: SentimentCollaborator + 'static,
        F: Fn() -> Result<C> + Send + Sync + 'static,
    {
        self.additional
            .push((ModelKind::Other(name.into()), sentiment_factory(factory)));
        self
    }

    pub fn segmenter<S, F>(mut self, factory: F) -> Self
    where
        S: SentenceSegmenter + 'static,
        F: Fn() -> Result<S> + Send + Sync + 'static,
    {
        self.segmenter = Some(Box::new(move || {
            factory().map(|s| Arc::new(s) as Arc<dyn SentenceSegmenter>)
        }));
        self
    }

    pub fn annotator<A, F>(mut self, factory: F) -> Self
    where
        A: LinguisticAnnotator + 'static,
        F: Fn() -> Result<A> + Send + Sync + 'static,
    {
        self.annotator = Some(Box::new(move || {
            factory().map(|a| Arc::new(a) as Arc<dyn LinguisticAnnotator>)
        }));
        self
    }

    pub fn build(self) -> CollaboratorRegistry {
        let capabilities = Capabilities {
            transformer: self.transformer.is_some(),
            lexicon: self.lexicon.is_some(),
            polarity: self.polarity.is_some(),
            segmenter: self.segmenter.is_some(),
            linguistic: self.annotator.is_some(),
            additional: self.additional.len(),
        };

        CollaboratorRegistry {
            transformer: Slot::new(ModelKind::Transformer.name(), self.transformer),
            lexicon: Slot::new(ModelKind::Lexicon.name(), self.lexicon),
            polarity: Slot::new(ModelKind::Polarity.name(), self.polarity),
            additional: self
                .additional
                .into_iter()
                .map(|(kind, factory)| {
                    let slot = Slot::new(kind.name(), Some(factory));
                    (kind, slot)
                })
                .collect(),
            segmenter: Slot::new("segmenter", self.segmenter),
            annotator: Slot::new("annotator", self.annotator),
            capabilities,
        }
    }
}

fn sentiment_factory<C, F>(factory: F) -> Factory<dyn SentimentCollaborator>
where
    C: SentimentCollaborator + 'static,
    F: Fn() -> Result<C> + Send + Sync + 'static,
{
    Box::new(move || factory().map(|c| Arc::new(c) as Arc<dyn SentimentCollaborator>))
}

/// Shared registry for application-wide use
pub type SharedRegistry = Arc<CollaboratorRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_default_capabilities() {
        let registry = CollaboratorRegistry::with_defaults();
        let capabilities = registry.capabilities();
        assert!(!capabilities.transformer);
        assert!(capabilities.lexicon);
        assert!(capabilities.polarity);
        assert!(capabilities.segmenter);
        assert!(!capabilities.linguistic);
        assert_eq!(registry.warm_up(), capabilities);
    }

    #[test]
    fn test_failed_factory_degrades_to_unavailable() {
        let registry = CollaboratorRegistry::builder()
            .lexicon(|| LexiconAnalyzer::with_lexicon_file("/nonexistent/lexicon.txt"))
            .build();

        assert!(registry.capabilities().lexicon);
        assert!(registry.lexicon().is_none());
        assert!(!registry.warm_up().lexicon);
    }

    #[test]
    fn test_factory_runs_once_under_contention() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = Arc::new(
            CollaboratorRegistry::builder()
                .polarity(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(20));
                    Ok(PolarityAnalyzer::new())
                })
                .build(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.polarity().is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_factory_is_not_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CollaboratorRegistry::builder()
            .transformer(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<PolarityAnalyzer, _>(sentiscope_core::Error::collaborator("model missing"))
            })
            .build();

        assert!(registry.transformer().is_none());
        assert!(registry.transformer().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disabled_collaborators_from_config() {
        let config = CollaboratorConfig::from_yaml(
            "lexicon:\n  enabled: false\npolarity:\n  enabled: false\nsegmenter: none\n",
        )
        .unwrap();
        let registry = CollaboratorRegistry::from_config(&config);

        assert_eq!(registry.capabilities(), Capabilities::default());
        assert!(registry.lexicon().is_none());
        assert!(registry.segmenter().is_none());
    }

    #[test]
    fn test_additional_collaborators_keep_order() {
        let registry = CollaboratorRegistry::builder()
            .additional("emoji", || Ok(PolarityAnalyzer::new()))
            .additional("sarcasm", || Ok(PolarityAnalyzer::new()))
            .build();

        let names: Vec<_> = registry.additional().map(|(kind, _)| kind.name().to_string()).collect();
        assert_eq!(names, vec!["emoji", "sarcasm"]);
        assert_eq!(registry.capabilities().additional, 2);
    }
}

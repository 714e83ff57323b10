//! Configuration for sentiment collaborators

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::transformer::DEFAULT_MAX_CHARS;

/// Which collaborators to register and how to reach them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    #[serde(default)]
    pub transformer: TransformerConfig,

    #[serde(default)]
    pub lexicon: LexiconConfig,

    #[serde(default)]
    pub polarity: ToggleConfig,

    #[serde(default)]
    pub segmenter: SegmenterKind,
}

impl CollaboratorConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> sentiscope_core::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> sentiscope_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// Remote transformer classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformerConfig {
    /// Disabled unless an endpoint is configured
    #[serde(default)]
    pub enabled: bool,

    /// Text-classification inference endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier, for logging
    #[serde(default = "default_transformer_model")]
    pub model: String,

    /// Environment variable holding the bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_env: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Input longer than this many characters is truncated
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl TransformerConfig {
    /// Whether a transformer collaborator should be registered at all
    pub fn is_configured(&self) -> bool {
        self.enabled && self.endpoint.is_some()
    }

    /// Resolve the API token from the configured environment variable
    pub fn api_token(&self) -> Option<String> {
        self.api_token_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok())
    }
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            model: default_transformer_model(),
            api_token_env: None,
            timeout_ms: default_timeout_ms(),
            max_chars: default_max_chars(),
        }
    }
}

/// Lexicon analyzer; always registered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// When false the lexicon contributes only neutral judgments
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Optional VADER-format lexicon of custom terms layered over VADER's own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lexicon_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Sentence segmentation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmenterKind {
    /// Punctuation and abbreviation rules
    #[default]
    RuleBased,
    /// Treat the whole text as one sentence
    None,
}

fn default_transformer_model() -> String {
    "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string()
}

fn default_timeout_ms() -> u64 {
    5_000
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_true() -> bool {
    true
}

//! Server configuration

use sentiscope_classifiers::CollaboratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Sentiment collaborators
    #[serde(default)]
    pub collaborators: CollaboratorConfig,

    /// Requests with longer text are rejected
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// Custom recommendation rule set; the built-in rules when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_rules: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        if let Some(endpoint) = &cli.transformer_endpoint {
            config.collaborators.transformer.endpoint = Some(endpoint.clone());
            config.collaborators.transformer.enabled = true;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            collaborators: CollaboratorConfig::default(),
            max_text_chars: default_max_text_chars(),
            recommendation_rules: None,
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_text_chars() -> usize {
    100_000
}

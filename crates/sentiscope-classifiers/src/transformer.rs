//! Transformer sentiment collaborator
//!
//! Inference runs behind a [`TextClassificationBackend`]; this module maps
//! the backend's top label onto a judgment. The shipped backend talks to a
//! Hugging Face style text-classification endpoint.

use crate::collaborator::{LabelScore, SentimentCollaborator, TextClassificationBackend};
use sentiscope_core::{Classification, ModelJudgment, ModelKind, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Transformer models accept a bounded context; longer text is cut
pub const DEFAULT_MAX_CHARS: usize = 512;

/// Sentiment collaborator backed by a transformer classifier
pub struct TransformerSentiment {
    backend: Arc<dyn TextClassificationBackend>,
    max_chars: usize,
}

impl TransformerSentiment {
    pub fn new(backend: Arc<dyn TextClassificationBackend>) -> Self {
        Self {
            backend,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl SentimentCollaborator for TransformerSentiment {
    fn judge(&self, text: &str) -> Result<ModelJudgment> {
        let truncated: String = text.chars().take(self.max_chars).collect();
        let LabelScore { label, score } = self.backend.predict(&truncated)?;
        debug!(model = self.backend.model_id(), %label, score, "Transformer prediction");
        Ok(judgment_from_label(&label, score))
    }

    fn kind(&self) -> ModelKind {
        ModelKind::Transformer
    }
}

/// Map a classifier label onto a judgment.
///
/// Labels mentioning `pos` are positive with compound `+score`, labels
/// mentioning `neg` negative with `-score`, anything else neutral with a
/// zero compound. The backend score is the confidence either way.
pub fn judgment_from_label(label: &str, score: f64) -> ModelJudgment {
    let label = label.to_lowercase();
    let (classification, compound) = if label.contains("pos") {
        (Classification::Positive, score)
    } else if label.contains("neg") {
        (Classification::Negative, -score)
    } else {
        (Classification::Neutral, 0.0)
    };
    ModelJudgment::new(ModelKind::Transformer, classification, score, compound)
}

/// Backend calling a remote text-classification inference endpoint
pub struct HttpInferenceBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    /// `[[{label, score}, ...]]`, one list per input
    Nested(Vec<Vec<LabelScore>>),
    /// `[{label, score}, ...]`
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn top(self) -> Option<LabelScore> {
        let candidates = match self {
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            Self::Flat(candidates) => candidates,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl HttpInferenceBackend {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| sentiscope_core::Error::http(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_token,
        })
    }
}

impl TextClassificationBackend for HttpInferenceBackend {
    fn predict(&self, text: &str) -> Result<LabelScore> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| sentiscope_core::Error::http(format!("Inference request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(sentiscope_core::Error::http(format!(
                "Inference endpoint returned {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|e| sentiscope_core::Error::http(format!("Failed to read response: {e}")))?;
        parse_inference_response(&body)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

fn parse_inference_response(body: &str) -> Result<LabelScore> {
    let response: InferenceResponse = serde_json::from_str(body)?;
    response
        .top()
        .ok_or_else(|| sentiscope_core::Error::collaborator("Inference endpoint returned no labels"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingBackend {
        reply: LabelScore,
        seen: Mutex<Vec<String>>,
    }

    impl TextClassificationBackend for RecordingBackend {
        fn predict(&self, text: &str) -> Result<LabelScore> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.reply.clone())
        }

        fn model_id(&self) -> &str {
            "recording"
        }
    }

    fn backend(label: &str, score: f64) -> Arc<RecordingBackend> {
        Arc::new(RecordingBackend {
            reply: LabelScore {
                label: label.to_string(),
                score,
            },
            seen: Mutex::new(Vec::new()),
        })
    }

    #[test]
    fn test_label_mapping() {
        let positive = judgment_from_label("POSITIVE", 0.9);
        assert_eq!(positive.classification, Classification::Positive);
        assert_eq!(positive.compound, 0.9);

        let negative = judgment_from_label("neg", 0.8);
        assert_eq!(negative.classification, Classification::Negative);
        assert_eq!(negative.compound, -0.8);
        assert_eq!(negative.confidence, 0.8);

        let neutral = judgment_from_label("neutral", 0.7);
        assert_eq!(neutral.classification, Classification::Neutral);
        assert_eq!(neutral.compound, 0.0);
        assert_eq!(neutral.confidence, 0.7);
    }

    #[test]
    fn test_truncates_long_input() {
        let backend = backend("positive", 0.99);
        let collaborator = TransformerSentiment::new(backend.clone()).with_max_chars(10);

        let judgment = collaborator.judge(&"é".repeat(40)).unwrap();
        assert_eq!(judgment.model, ModelKind::Transformer);
        assert_eq!(backend.seen.lock().unwrap()[0].chars().count(), 10);
    }

    #[test]
    fn test_parse_nested_response() {
        let body = r#"[[{"label":"negative","score":0.1},{"label":"positive","score":0.85},{"label":"neutral","score":0.05}]]"#;
        let top = parse_inference_response(body).unwrap();
        assert_eq!(top.label, "positive");
        assert_eq!(top.score, 0.85);
    }

    #[test]
    fn test_parse_flat_response() {
        let body = r#"[{"label":"NEGATIVE","score":0.97}]"#;
        assert_eq!(parse_inference_response(body).unwrap().label, "NEGATIVE");
    }

    #[test]
    fn test_parse_empty_response_is_error() {
        assert!(parse_inference_response("[]").is_err());
        assert!(parse_inference_response("[[]]").is_err());
        assert!(parse_inference_response(r#"{"error":"loading"}"#).is_err());
    }
}

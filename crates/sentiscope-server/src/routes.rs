//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sentiscope_policy::AnalysisContext;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info};

use crate::report;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .route("/api/nlp/advanced-sentiment", post(advanced_sentiment))
        .route("/api/nlp/text-classification", post(text_classification))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "sentiscope",
        "version": env!("CARGO_PKG_VERSION"),
        "collaborators": state.scorer.registry().capabilities(),
    }))
}

async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics_handle.render(),
    )
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    #[serde(default)]
    text: Option<String>,

    /// Publishing context; an empty object counts as absent
    #[serde(default)]
    context: Option<AnalysisContext>,
}

#[derive(Debug, Serialize)]
struct Success<T> {
    success: bool,
    data: T,
}

impl<T> Success<T> {
    fn new(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Ensemble sentiment analysis with recommendations
async fn advanced_sentiment(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    metrics::counter!("sentiscope_requests_total", "endpoint" => "advanced_sentiment").increment(1);
    let start = Instant::now();

    let Json(request) = body?;
    let text = required_text(&state, request.text)?;
    let context = request
        .context
        .filter(|c| *c != AnalysisContext::default());
    debug!(
        chars = text.chars().count(),
        platform = context.as_ref().and_then(|c| c.platform.as_deref()),
        "Received sentiment analysis request"
    );

    let scorer = state.scorer.clone();
    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || {
        report::analyze(&scorer, &engine, &text, context.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {e}")))?;

    let latency_us = start.elapsed().as_micros() as u64;
    metrics::histogram!("sentiscope_analysis_latency_us").record(latency_us as f64);
    info!(
        classification = %report.sentiment.classification,
        confidence = report.sentiment.confidence,
        recommendations = report.recommendation_count,
        latency_us,
        "Sentiment analysis complete"
    );

    Ok(Success::new(report).into_response())
}

/// Content category classification
async fn text_classification(
    State(state): State<AppState>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    metrics::counter!("sentiscope_requests_total", "endpoint" => "text_classification").increment(1);

    let Json(request) = body?;
    let text = required_text(&state, request.text)?;
    let verdict = state.categories.classify(&text);
    debug!(category = ?verdict.category, confidence = verdict.confidence, "Text classified");

    Ok(Success::new(verdict).into_response())
}

fn required_text(state: &AppState, text: Option<String>) -> Result<String, AppError> {
    let text = text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| sentiscope_core::Error::input("Text is required"))?;

    let max = state.config.max_text_chars;
    if text.chars().count() > max {
        return Err(sentiscope_core::Error::input(format!(
            "Text exceeds maximum length of {max} characters"
        ))
        .into());
    }
    Ok(text)
}

async fn fallback() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Application error type
#[derive(Debug)]
enum AppError {
    InvalidRequest(String),
    Internal(String),
}

impl From<sentiscope_core::Error> for AppError {
    fn from(err: sentiscope_core::Error) -> Self {
        match err {
            sentiscope_core::Error::Input(msg) => AppError::InvalidRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

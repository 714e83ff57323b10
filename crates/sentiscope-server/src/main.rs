//! Sentiscope Server
//!
//! HTTP service for ensemble sentiment analysis of social media content.
//!
//! Each request is scored by the available sentiment collaborators, fused
//! into one verdict, and turned into publishing recommendations.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

mod config;
mod report;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "sentiscope-server")]
#[command(about = "Sentiscope sentiment analysis service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SENTISCOPE_CONFIG", default_value = "sentiscope.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "SENTISCOPE_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "SENTISCOPE_PORT")]
    pub port: Option<u16>,

    /// Transformer inference endpoint; enables the transformer collaborator
    #[arg(short, long, env = "SENTISCOPE_TRANSFORMER_ENDPOINT")]
    pub transformer_endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json_logs);

    info!("Starting Sentiscope Server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!(
        "Transformer: {}",
        config
            .collaborators
            .transformer
            .endpoint
            .as_deref()
            .filter(|_| config.collaborators.transformer.is_configured())
            .unwrap_or("disabled")
    );
    info!("Maximum text length: {} characters", config.max_text_chars);

    let metrics_handle = init_metrics()?;

    info!("Initializing collaborators...");
    let state = AppState::new(config.clone(), metrics_handle)?;
    let warm = state.clone();
    let capabilities = tokio::task::spawn_blocking(move || warm.scorer.registry().warm_up()).await?;
    info!(
        transformer = capabilities.transformer,
        lexicon = capabilities.lexicon,
        polarity = capabilities.polarity,
        segmenter = capabilities.segmenter,
        "Collaborators ready"
    );
    info!("Recommendation rules: {}", state.engine.rules().name);

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sentiscope=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentiscope=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "sentiscope_requests_total",
        "Total number of analysis requests by endpoint"
    );
    metrics::describe_histogram!(
        "sentiscope_analysis_latency_us",
        metrics::Unit::Microseconds,
        "End-to-end analysis latency in microseconds"
    );
    metrics::describe_histogram!(
        "sentiscope_scoring_latency_us",
        metrics::Unit::Microseconds,
        "Ensemble scoring latency in microseconds"
    );
    metrics::describe_counter!(
        "sentiscope_collaborator_failures_total",
        "Collaborator calls that failed and were skipped, by model"
    );
    metrics::describe_counter!(
        "sentiscope_collaborator_init_failures_total",
        "Collaborators that failed to initialize, by model"
    );
    metrics::describe_counter!(
        "sentiscope_recommendations_total",
        "Recommendations emitted, by type"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}

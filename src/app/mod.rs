pub mod routes;
pub mod templates;

use crate::adapters::{classifier_from_config, GoogleFactChecker};
use crate::config::ServiceConfig;
use crate::core::credibility::CredibilityTable;
use crate::core::detector::HybridDetector;
use crate::core::stopwords::StopwordSet;
use crate::domain::ports::ZeroShotClassifier;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use templates::TemplateStore;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<HybridDetector>,
    pub templates: TemplateStore,
    pub monitor: Arc<SystemMonitor>,
}

impl AppState {
    pub fn new(detector: HybridDetector, templates: TemplateStore, monitor: SystemMonitor) -> Self {
        Self {
            detector: Arc::new(detector),
            templates,
            monitor: Arc::new(monitor),
        }
    }
}

/// Wires adapters, data files and templates from a validated config.
pub fn build_state(config: &ServiceConfig) -> Result<AppState> {
    let fact_checker = GoogleFactChecker::from_config(config)?;
    if !fact_checker.is_enabled() {
        tracing::warn!("GOOGLE_FACTCHECK_API_KEY not set, fact-check layer disabled");
    }
    let classifier: Arc<dyn ZeroShotClassifier> = Arc::from(classifier_from_config(config)?);

    let credibility = CredibilityTable::load_or_empty(&config.data.credibility_path);
    let stopwords = StopwordSet::load_or_default(config.data.stopwords_dir.as_deref().map(Path::new));

    let detector = HybridDetector::new(Arc::new(fact_checker), classifier, credibility)
        .with_stopwords(stopwords)
        .with_weights(config.fusion)
        .with_max_query_terms(config.factcheck.max_query_terms);

    let templates = TemplateStore::new(&config.server.templates_dir);
    if !templates.dir().is_dir() {
        tracing::warn!("Templates directory {} does not exist", templates.dir().display());
    }

    Ok(AppState::new(
        detector,
        templates,
        SystemMonitor::new(config.monitoring.enabled),
    ))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/predict_page", get(routes::predict_page))
        .route("/check", post(routes::check_news))
        .route("/api/check", post(routes::check_news_api))
        .route("/health", get(routes::health_check))
        .with_state(state)
}

/// Serves until Ctrl-C (or SIGTERM on unix).
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("🚀 news-verify listening on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received");
}

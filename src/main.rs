//! Symptom triage HTTP server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use symptom_triage::api::{create_router, AppState};
use symptom_triage::config::TriageConfig;
use symptom_triage::db::SqliteSessionStore;
use symptom_triage::model::ModelBundle;
use symptom_triage::prediction::PredictionEngine;
use symptom_triage::runtime::TriageRuntime;
use symptom_triage::session::{MemorySessionStore, SessionStore};
use symptom_triage::vocabulary::Vocabulary;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symptom_triage=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = TriageConfig::from_env();

    // Trained artifacts are required; there is no fallback model
    tracing::info!(
        model = %config.model_path.display(),
        labels = %config.labels_path.display(),
        "Loading classifier"
    );
    let bundle = ModelBundle::load(&config.model_path, &config.labels_path)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load classifier artifacts"))?;
    let engine = Arc::new(PredictionEngine::new(Vocabulary::builtin(), bundle)?);

    let store: Arc<dyn SessionStore> = match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            tracing::info!(path = %path.display(), "Opening session database");
            Arc::new(SqliteSessionStore::open(path, config.session_ttl())?)
        }
        None => {
            tracing::info!("Keeping sessions in memory");
            Arc::new(MemorySessionStore::new(config.session_ttl()))
        }
    };

    let state = AppState::new(TriageRuntime::new(engine, store));

    // Idle sessions are also dropped lazily on access; this bounds storage
    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match purge_state.runtime.purge_expired() {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged idle sessions"),
                Err(e) => tracing::warn!(error = %e, "Session purge failed"),
            }
        }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Symptom triage server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod attendance;
mod config;
mod db;
mod errors;
mod face_client;
mod models;
mod ner_client;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::attendance::reference::ReferenceImages;
use crate::attendance::service::AttendanceService;
use crate::attendance::store::PgAttendanceStore;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::face_client::FaceAnalysisClient;
use crate::ner_client::NerClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting campus API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    let timeout = Duration::from_secs(config.service_timeout_secs);

    // Face-analysis sidecar: one client for verification and emotion tagging
    let faces = Arc::new(FaceAnalysisClient::new(
        &config.face_service_url,
        &config.face_model,
        timeout,
    )?);
    info!(
        "Face analysis client initialized (model: {})",
        faces.model_name()
    );

    let recognizer = NerClient::new(&config.ner_service_url, &config.ner_model, timeout)?;
    info!("NER client initialized (model: {})", recognizer.model());

    let references = ReferenceImages::new(&config.reference_dir);
    info!("Reference images served from {}", references.dir().display());

    // Build app state
    let state = AppState {
        attendance: AttendanceService::new(
            references,
            faces.clone(),
            faces,
            Arc::new(PgAttendanceStore::new(db)),
        ),
        recognizer: Arc::new(recognizer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

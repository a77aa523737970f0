use std::sync::Arc;

use crate::attendance::service::AttendanceService;
use crate::config::Config;
use crate::ner_client::EntityRecognizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; every handle is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Face verification, emotion tagging and the attendance store.
    pub attendance: AttendanceService,
    /// Pluggable entity recognizer. Default: `NerClient` over HTTP.
    pub recognizer: Arc<dyn EntityRecognizer>,
}

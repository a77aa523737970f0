pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::attendance::handlers as attendance;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Attendance API
        .route("/analyze", post(attendance::handle_analyze))
        .route("/attendance/:user_name", get(attendance::handle_attendance))
        // Resume API
        .route("/extract/", post(resume::handle_extract))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

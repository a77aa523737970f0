//! Axum route handlers for the attendance API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::attendance::service::{
    format_time, local_now, AnalyzeOutcome, AnalyzeRequest, AttendanceError,
};
use crate::errors::AppError;
use crate::models::attendance::AttendanceRecord;
use crate::state::AppState;

const NO_EMOTION: &str = "N/A";

/// Body of every `/analyze` response, success or failure.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub emotion: String,
    pub time: String,
}

impl From<AnalyzeOutcome> for AnalyzeResponse {
    fn from(outcome: AnalyzeOutcome) -> Self {
        match outcome {
            AnalyzeOutcome::Verified { emotion, time } => AnalyzeResponse {
                verified: true,
                error: None,
                emotion,
                time,
            },
            AnalyzeOutcome::NotVerified { time } => AnalyzeResponse {
                verified: false,
                error: None,
                emotion: NO_EMOTION.to_string(),
                time,
            },
        }
    }
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let status = match &self {
            AttendanceError::ReferenceNotFound => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!("Attendance analysis failed: {:?}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = AnalyzeResponse {
            verified: false,
            error: Some(self.to_string()),
            emotion: NO_EMOTION.to_string(),
            time: format_time(local_now()),
        };

        (status, Json(body)).into_response()
    }
}

/// POST /analyze
///
/// Verifies a camera capture against the student's reference photo and, on a
/// match, records attendance tagged with the dominant emotion.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AttendanceError> {
    let Json(request) = payload.map_err(|e| AttendanceError::Malformed(e.body_text()))?;
    let outcome = state.attendance.analyze(request).await?;
    Ok(Json(outcome.into()))
}

/// GET /attendance/:user_name
///
/// Returns every stored record for the user, oldest first.
pub async fn handle_attendance(
    State(state): State<AppState>,
    Path(user_name): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let records = state.attendance.history(&user_name).await?;
    Ok(Json(records))
}

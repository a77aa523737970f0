//! Axum route handlers for the resume extraction API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::resume::extract::{extract_resume, ExtractResponse};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /extract/
///
/// Accepts a multipart upload with a `file` part (PDF or DOCX) and returns the
/// extracted contact fields, entities and the full document text.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let response = extract_resume(&filename, bytes, state.recognizer.as_ref()).await?;
        return Ok(Json(response));
    }

    Err(AppError::UnprocessableEntity(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::attendance::store::StoreError;
use crate::ner_client::NerError;
use crate::resume::documents::DocumentError;

/// Application-level error type for the resume and read-only attendance routes.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The body is always `{"error": "<message>"}`. Server-side faults carry the
/// underlying message verbatim so browser clients can show what went wrong.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Ner(#[from] NerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_)
            | AppError::Document(_)
            | AppError::Ner(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg)
            | AppError::UnprocessableEntity(msg) => msg.clone(),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                e.to_string()
            }
            AppError::Document(e) => {
                tracing::error!("Document extraction error: {e}");
                e.to_string()
            }
            AppError::Ner(e) => {
                tracing::error!("Entity recognition error: {e}");
                e.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                e.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

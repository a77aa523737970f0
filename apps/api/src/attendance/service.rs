//! Attendance verification orchestration.
//!
//! decode capture → reference lookup → verify → (on match) classify emotion → persist.
//! A negative verification is a normal outcome: nothing is classified or stored.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::attendance::capture::decode_capture;
use crate::attendance::reference::ReferenceImages;
use crate::attendance::store::{AttendanceStore, StoreError};
use crate::face_client::{EmotionClassifier, FaceServiceError, FaceVerifier};
use crate::models::attendance::{AttendanceRecord, TIMESTAMP_FORMAT};

#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error("Reference image not found")]
    ReferenceNotFound,

    #[error("{0}")]
    Malformed(String),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Face verification failed: {0}")]
    Verification(#[source] FaceServiceError),

    #[error("Emotion analysis failed: {0}")]
    Emotion(#[source] FaceServiceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Image decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Camera capture as a `data:image/...;base64,` URL.
    pub image: String,
    /// Missing or null ids never resolve to a reference image.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Defaults to `student_id` when absent.
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    Verified { emotion: String, time: String },
    NotVerified { time: String },
}

/// Wall-clock time as stamped on records and responses.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_time(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Holds the collaborators of the attendance flow. Cheap to clone.
#[derive(Clone)]
pub struct AttendanceService {
    references: ReferenceImages,
    verifier: Arc<dyn FaceVerifier>,
    emotions: Arc<dyn EmotionClassifier>,
    store: Arc<dyn AttendanceStore>,
}

impl AttendanceService {
    pub fn new(
        references: ReferenceImages,
        verifier: Arc<dyn FaceVerifier>,
        emotions: Arc<dyn EmotionClassifier>,
        store: Arc<dyn AttendanceStore>,
    ) -> Self {
        Self {
            references,
            verifier,
            emotions,
            store,
        }
    }

    /// Runs one scan. On a positive match exactly one record is appended.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeOutcome, AttendanceError> {
        let AnalyzeRequest {
            image,
            student_id,
            user_name,
        } = request;
        let student_id = student_id.unwrap_or_default();
        let user_name = user_name.unwrap_or_else(|| student_id.clone());

        let capture = tokio::task::spawn_blocking(move || decode_capture(&image)).await??;

        let reference = self
            .references
            .lookup(&student_id)
            .await
            .ok_or(AttendanceError::ReferenceNotFound)?;

        let verification = self
            .verifier
            .verify(&capture, &reference)
            .await
            .map_err(AttendanceError::Verification)?;

        if !verification.verified {
            info!("Face not verified for student '{student_id}'");
            return Ok(AnalyzeOutcome::NotVerified {
                time: format_time(local_now()),
            });
        }

        let now = local_now();
        let emotion = self
            .emotions
            .dominant_emotion(&capture)
            .await
            .map_err(AttendanceError::Emotion)?;

        let record = AttendanceRecord::verified(&student_id, &user_name, &emotion, now);
        self.store.insert(&record).await?;
        info!(
            "Attendance recorded for student '{}' ({}) at {}",
            record.student_id, record.user_name, record.timestamp
        );

        Ok(AnalyzeOutcome::Verified {
            emotion,
            time: record.timestamp,
        })
    }

    /// Every record stored for `user_name`, in insertion order.
    pub async fn history(&self, user_name: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.store.find_by_user_name(user_name).await
    }
}

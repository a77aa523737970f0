use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One successful face-verified scan. Append-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub user_name: String,
    pub verified: bool,
    pub emotion: String,
    pub timestamp: String,
    pub date: String,
}

impl AttendanceRecord {
    /// Builds a verified record stamped with `at`.
    pub fn verified(
        student_id: impl Into<String>,
        user_name: impl Into<String>,
        emotion: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            user_name: user_name.into(),
            verified: true,
            emotion: emotion.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            date: at.date().format(DATE_FORMAT).to_string(),
        }
    }
}

/// Database row shape. The surrogate `id` and `created_at` never leave the store.
#[allow(dead_code)]
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRow {
    pub id: Uuid,
    pub student_id: String,
    pub user_name: String,
    pub verified: bool,
    pub emotion: String,
    pub timestamp: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        Self {
            student_id: row.student_id,
            user_name: row.user_name,
            verified: row.verified,
            emotion: row.emotion,
            timestamp: row.timestamp,
            date: row.date,
        }
    }
}

//! Attendance persistence. Append-only: records are inserted, never updated or deleted.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, AttendanceRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Appends one record. Each call writes a new row; there is no dedup.
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError>;

    /// All records for `user_name`, oldest first.
    async fn find_by_user_name(&self, user_name: &str)
        -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// PostgreSQL-backed store over the `attendance` table.
#[derive(Clone)]
pub struct PgAttendanceStore {
    pool: PgPool,
}

impl PgAttendanceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO attendance
                (id, student_id, user_name, verified, emotion, "timestamp", "date")
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.student_id)
        .bind(&record.user_name)
        .bind(record.verified)
        .bind(&record.emotion)
        .bind(&record.timestamp)
        .bind(&record.date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            "SELECT * FROM attendance WHERE user_name = $1 ORDER BY created_at, id",
        )
        .bind(user_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }
}

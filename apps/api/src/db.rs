use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `attendance` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          UUID PRIMARY KEY,
            student_id  TEXT NOT NULL,
            user_name   TEXT NOT NULL,
            verified    BOOLEAN NOT NULL,
            emotion     TEXT NOT NULL,
            "timestamp" TEXT NOT NULL,
            "date"      TEXT NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS attendance_user_name_idx ON attendance (user_name)")
        .execute(pool)
        .await?;

    info!("Attendance schema ready");
    Ok(())
}

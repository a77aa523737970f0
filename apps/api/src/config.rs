use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the face-analysis sidecar (verification + emotion).
    pub face_service_url: String,
    /// Base URL of the named-entity recognition sidecar.
    pub ner_service_url: String,
    /// Directory holding one `<student_id>.jpg` reference image per student.
    pub reference_dir: PathBuf,
    pub face_model: String,
    pub ner_model: String,
    pub service_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            face_service_url: require_env("FACE_SERVICE_URL")?,
            ner_service_url: require_env("NER_SERVICE_URL")?,
            reference_dir: PathBuf::from(env_or("REFERENCE_DIR", "students")),
            face_model: env_or("FACE_MODEL", "Facenet"),
            ner_model: env_or("NER_MODEL", "en_core_web_sm"),
            service_timeout_secs: env_or("SERVICE_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("SERVICE_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: env_or("PORT", "5001")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

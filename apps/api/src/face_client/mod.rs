/// Face-analysis client — the single point of entry for face verification and
/// emotion classification.
///
/// Both capabilities live in a sidecar service that keeps the embedding model
/// loaded for the lifetime of the process. This module talks to it over HTTP and
/// exposes each capability as its own trait so handlers and tests can swap the
/// backend without touching the orchestration code.
///
/// No retries: a failed call surfaces immediately.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FaceServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Face service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to read reference image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Face service returned no analysis results")]
    EmptyResult,
}

/// Outcome of comparing a captured image against a reference image.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Verification {
    pub verified: bool,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Compares two face images. Implementations must not retry.
#[async_trait]
pub trait FaceVerifier: Send + Sync {
    async fn verify(
        &self,
        capture_jpeg: &[u8],
        reference: &Path,
    ) -> Result<Verification, FaceServiceError>;
}

/// Classifies the dominant emotion of the face in an image.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn dominant_emotion(&self, jpeg: &[u8]) -> Result<String, FaceServiceError>;
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    img1_path: String,
    img2_path: String,
    model_name: &'a str,
    enforce_detection: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    img_path: String,
    actions: [&'a str; 1],
    enforce_detection: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    results: Vec<FaceAnalysis>,
}

#[derive(Debug, Deserialize)]
struct FaceAnalysis {
    dominant_emotion: String,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
}

/// HTTP client for the face-analysis sidecar. Cheap to clone.
#[derive(Clone)]
pub struct FaceAnalysisClient {
    client: Client,
    base_url: String,
    model_name: String,
}

impl FaceAnalysisClient {
    pub fn new(base_url: &str, model_name: &str, timeout: Duration) -> Result<Self, FaceServiceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name: model_name.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FaceServiceError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(FaceServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FaceVerifier for FaceAnalysisClient {
    async fn verify(
        &self,
        capture_jpeg: &[u8],
        reference: &Path,
    ) -> Result<Verification, FaceServiceError> {
        let reference_bytes = tokio::fs::read(reference).await?;
        let request = VerifyRequest {
            img1_path: jpeg_data_url(capture_jpeg),
            img2_path: jpeg_data_url(&reference_bytes),
            model_name: &self.model_name,
            enforce_detection: false,
        };

        let verification: Verification = self.post("/verify", &request).await?;
        debug!(
            "Face verification: verified={} distance={:?} threshold={:?}",
            verification.verified, verification.distance, verification.threshold
        );
        Ok(verification)
    }
}

#[async_trait]
impl EmotionClassifier for FaceAnalysisClient {
    async fn dominant_emotion(&self, jpeg: &[u8]) -> Result<String, FaceServiceError> {
        let request = AnalyzeRequest {
            img_path: jpeg_data_url(jpeg),
            actions: ["emotion"],
            enforce_detection: false,
        };

        let response: AnalyzeResponse = self.post("/analyze", &request).await?;
        dominant_of(response)
    }
}

/// The sidecar returns one analysis per detected face; the first face wins.
fn dominant_of(response: AnalyzeResponse) -> Result<String, FaceServiceError> {
    response
        .results
        .into_iter()
        .next()
        .map(|face| face.dominant_emotion)
        .ok_or(FaceServiceError::EmptyResult)
}

fn jpeg_data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_deserializes_with_metrics() {
        let json = r#"{"verified": true, "distance": 0.31, "threshold": 0.4, "model": "Facenet"}"#;
        let v: Verification = serde_json::from_str(json).unwrap();
        assert!(v.verified);
        assert_eq!(v.distance, Some(0.31));
        assert_eq!(v.threshold, Some(0.4));
    }

    #[test]
    fn test_verification_deserializes_without_metrics() {
        let v: Verification = serde_json::from_str(r#"{"verified": false}"#).unwrap();
        assert!(!v.verified);
        assert_eq!(v.distance, None);
    }

    #[test]
    fn test_dominant_of_takes_first_face() {
        let json = r#"{"results": [
            {"dominant_emotion": "happy", "emotion": {"happy": 92.1}},
            {"dominant_emotion": "sad"}
        ]}"#;
        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(dominant_of(response).unwrap(), "happy");
    }

    #[test]
    fn test_dominant_of_empty_results_is_error() {
        let response: AnalyzeResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(matches!(
            dominant_of(response),
            Err(FaceServiceError::EmptyResult)
        ));
    }

    #[test]
    fn test_jpeg_data_url_prefix() {
        assert_eq!(jpeg_data_url(b"abc"), "data:image/jpeg;base64,YWJj");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            FaceAnalysisClient::new("http://faces:5005/", "Facenet", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://faces:5005");
        assert_eq!(client.model_name(), "Facenet");
    }
}

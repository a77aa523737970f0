/// Named-entity recognition client.
///
/// Entity tagging is delegated to an NLP sidecar; this crate only consumes the
/// ordered span list it returns.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::EntitySpan;

#[derive(Debug, Error)]
pub enum NerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Tags entity spans in free text, in document order.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, NerError>;
}

#[derive(Debug, Serialize)]
struct EntsRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntsResponse {
    ents: Vec<EntitySpan>,
}

#[derive(Clone)]
pub struct NerClient {
    client: Client,
    base_url: String,
    model: String,
}

impl NerClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, NerError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EntityRecognizer for NerClient {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, NerError> {
        let response = self
            .client
            .post(format!("{}/ents", self.base_url))
            .json(&EntsRequest {
                text,
                model: &self.model,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NerError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: EntsResponse = response.json().await?;
        debug!("NER returned {} entities", body.ents.len());
        Ok(body.ents)
    }
}

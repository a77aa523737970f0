//! Resume extraction pipeline: route → extract text → contact fields → entities.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ExtractedResumeFields;
use crate::ner_client::EntityRecognizer;
use crate::resume::contact::extract_contact_fields;
use crate::resume::documents::{extract_text, DocumentFormat};
use crate::resume::entities::select_entity_fields;
use crate::resume::links::extract_profile_links;

pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format";

/// Body of `POST /extract/`. A rejected upload is still a 200 with an `error` field.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Extracted(ExtractedResumeFields),
    Rejected { error: String },
}

pub async fn extract_resume(
    filename: &str,
    bytes: Bytes,
    recognizer: &dyn EntityRecognizer,
) -> Result<ExtractResponse, AppError> {
    let Some(format) = DocumentFormat::from_filename(filename) else {
        warn!("Rejected upload '{filename}': unsupported format");
        return Ok(ExtractResponse::Rejected {
            error: UNSUPPORTED_FORMAT.to_string(),
        });
    };

    let raw_text = extract_text(format, bytes).await?;
    Ok(ExtractResponse::Extracted(
        parse_resume_text(raw_text, recognizer).await?,
    ))
}

/// Derives the structured fields from already-extracted document text.
pub async fn parse_resume_text(
    raw_text: String,
    recognizer: &dyn EntityRecognizer,
) -> Result<ExtractedResumeFields, AppError> {
    let contact = extract_contact_fields(&raw_text);
    let links = extract_profile_links(&raw_text);
    let entities = recognizer.recognize(&raw_text).await?;
    let selected = select_entity_fields(&entities);

    info!(
        "Parsed resume: {} chars, {} entities, name found: {}",
        raw_text.len(),
        entities.len(),
        selected.name.is_some()
    );

    Ok(ExtractedResumeFields {
        email: contact.email,
        phone: contact.phone,
        name: selected.name,
        organizations: selected.organizations,
        links,
        raw_text,
    })
}

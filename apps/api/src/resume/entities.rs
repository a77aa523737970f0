//! Entity-field selection over recognizer output.

use crate::models::resume::{EntityLabel, EntitySpan};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFields {
    pub name: Option<String>,
    pub organizations: Vec<String>,
}

/// Picks the first PERSON span as the candidate's name and keeps every ORG span
/// in recognizer order. Duplicates are kept as emitted.
pub fn select_entity_fields(entities: &[EntitySpan]) -> EntityFields {
    let name = entities
        .iter()
        .find(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.clone());

    let organizations = entities
        .iter()
        .filter(|e| e.label == EntityLabel::Org)
        .map(|e| e.text.clone())
        .collect();

    EntityFields {
        name,
        organizations,
    }
}

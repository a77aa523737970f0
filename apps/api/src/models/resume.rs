use serde::{Deserialize, Serialize};

/// Structured fields pulled out of one uploaded resume. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResumeFields {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub organizations: Vec<String>,
    pub links: ProfileLinks,
    pub raw_text: String,
}

/// First profile URL of each kind found in the document text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileLinks {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub leetcode: Option<String>,
    pub portfolio: Option<String>,
}

/// Entity category emitted by the recognizer. Only PERSON and ORG are acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Org,
    Other(String),
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "PERSON" => EntityLabel::Person,
            "ORG" => EntityLabel::Org,
            _ => EntityLabel::Other(label),
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        match label {
            EntityLabel::Person => "PERSON".to_string(),
            EntityLabel::Org => "ORG".to_string(),
            EntityLabel::Other(other) => other,
        }
    }
}

/// A contiguous text span tagged by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

impl EntitySpan {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: EntityLabel::from(label.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_label_known_values() {
        let label: EntityLabel = serde_json::from_str(r#""PERSON""#).unwrap();
        assert_eq!(label, EntityLabel::Person);
        let label: EntityLabel = serde_json::from_str(r#""ORG""#).unwrap();
        assert_eq!(label, EntityLabel::Org);
    }

    #[test]
    fn test_entity_label_unknown_value_is_kept() {
        let label: EntityLabel = serde_json::from_str(r#""GPE""#).unwrap();
        assert_eq!(label, EntityLabel::Other("GPE".to_string()));
        assert_eq!(serde_json::to_string(&label).unwrap(), r#""GPE""#);
    }

    #[test]
    fn test_entity_span_deserializes_ignoring_offsets() {
        let json = r#"{"text": "Acme Corp", "label": "ORG", "start": 10, "end": 19}"#;
        let span: EntitySpan = serde_json::from_str(json).unwrap();
        assert_eq!(span, EntitySpan::new("Acme Corp", "ORG"));
    }

    #[test]
    fn test_extracted_fields_serialize_nulls() {
        let fields = ExtractedResumeFields {
            email: None,
            phone: None,
            name: None,
            organizations: vec![],
            links: ProfileLinks::default(),
            raw_text: String::new(),
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert!(value["email"].is_null());
        assert!(value["phone"].is_null());
        assert!(value["name"].is_null());
        assert_eq!(value["organizations"], serde_json::json!([]));
        assert!(value["links"]["github"].is_null());
    }
}

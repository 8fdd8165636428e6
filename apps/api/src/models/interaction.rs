use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TouchpointType {
    WhatsApp,
    #[serde(rename = "Ligação")]
    Call,
    #[serde(rename = "Visita")]
    Visit,
    #[serde(rename = "Encontro")]
    Meeting,
}

/// A logged contact with a person. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Touchpoint {
    pub id: String,
    pub person_id: String,
    pub author_id: String,
    pub at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TouchpointType,
    pub body: String,
}

/// Free-form note. Confidential bodies are only shown to pastors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub person_id: String,
    pub author_id: String,
    pub at: DateTime<Utc>,
    pub body: String,
    pub confidential: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    pub id: String,
    pub person_id: String,
    pub name: String,
    pub url: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub person_id: String,
    pub title: String,
    pub description: String,
    pub at: DateTime<Utc>,
}

/// What kind of interaction is being logged: one of the touchpoint channels or a note.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub enum InteractionType {
    WhatsApp,
    #[serde(rename = "Ligação")]
    Call,
    #[serde(rename = "Visita")]
    Visit,
    #[serde(rename = "Encontro")]
    Meeting,
    Note,
}

impl InteractionType {
    /// `None` for notes.
    pub fn touchpoint_type(&self) -> Option<TouchpointType> {
        match self {
            InteractionType::WhatsApp => Some(TouchpointType::WhatsApp),
            InteractionType::Call => Some(TouchpointType::Call),
            InteractionType::Visit => Some(TouchpointType::Visit),
            InteractionType::Meeting => Some(TouchpointType::Meeting),
            InteractionType::Note => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInteraction {
    pub body: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub confidential: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSource {
    Touchpoint,
    Note,
}

/// Merged timeline entry shown on a person's interaction tab.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InteractionItem {
    pub id: String,
    pub source: InteractionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touchpoint_type: Option<TouchpointType>,
    pub at: DateTime<Utc>,
    pub author_id: String,
    pub author_name: Option<String>,
    pub body: String,
    pub confidential: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_interaction_has_no_touchpoint_type() {
        let req: NewInteraction =
            serde_json::from_str(r#"{"body": "Orou conosco", "type": "Note", "confidential": true}"#)
                .unwrap();
        assert_eq!(req.kind, InteractionType::Note);
        assert!(req.kind.touchpoint_type().is_none());
        assert!(req.confidential);
    }

    #[test]
    fn test_call_interaction_maps_to_touchpoint() {
        let req: NewInteraction =
            serde_json::from_str(r#"{"body": "Liguei", "type": "Ligação"}"#).unwrap();
        assert_eq!(req.kind.touchpoint_type(), Some(TouchpointType::Call));
        assert!(!req.confidential);
    }
}

//! Event → action bindings stored on nodes.
//!
//! The action vocabulary is fixed and small; it is interpreted by
//! `pageforge-runtime`, never compiled. Unrecognized action payloads
//! survive deserialization as `Action::Unknown` so a project authored
//! against a newer vocabulary still round-trips.

use serde::{Deserialize, Serialize};

/// Triggering UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "onClick")]
    Click,
    #[serde(rename = "onMouseEnter")]
    MouseEnter,
    #[serde(rename = "onSubmit")]
    Submit,
}

/// Visibility action verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityVerb {
    Show,
    Hide,
    Toggle,
}

/// Declarative action descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    Navigate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_id: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    OpenUrl {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default)]
        new_tab: bool,
    },

    #[serde(rename_all = "camelCase")]
    Visibility {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_node_id: Option<String>,
        verb: VisibilityVerb,
    },

    #[serde(rename_all = "camelCase")]
    Scroll {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_node_id: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    FormSubmit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },

    /// Catch-all for action types this build does not recognize.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl Action {
    /// Human-readable action tag, for logging.
    pub fn kind(&self) -> &str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::OpenUrl { .. } => "open_url",
            Action::Visibility { .. } => "visibility",
            Action::Scroll { .. } => "scroll",
            Action::FormSubmit { .. } => "form_submit",
            Action::Unknown(_) => "unknown",
        }
    }
}

/// A stored event → action rule attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionBinding {
    pub id: String,
    pub event: EventKind,
    pub action: Action,
}

impl InteractionBinding {
    pub fn new(event: EventKind, action: Action) -> Self {
        Self {
            id: pageforge_common::new_binding_id(),
            event,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_names() {
        assert_eq!(
            serde_json::to_string(&EventKind::Click).unwrap(),
            "\"onClick\""
        );
        assert_eq!(
            serde_json::to_string(&EventKind::MouseEnter).unwrap(),
            "\"onMouseEnter\""
        );
    }

    #[test]
    fn test_action_roundtrip() {
        let action = Action::Visibility {
            target_node_id: Some("text_12345678".into()),
            verb: VisibilityVerb::Toggle,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"visibility\""));
        assert!(json.contains("\"targetNodeId\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_unrecognized_action_survives() {
        let json = r#"{"type":"play_sound","soundId":"chime"}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert!(matches!(action, Action::Unknown(_)));
        assert_eq!(action.kind(), "unknown");

        // And it serializes back without losing the payload
        let back = serde_json::to_string(&action).unwrap();
        assert!(back.contains("play_sound"));
    }

    #[test]
    fn test_binding_ids_are_minted() {
        let b = InteractionBinding::new(
            EventKind::Click,
            Action::Navigate { page_id: None },
        );
        assert!(b.id.starts_with("interaction_"));
    }
}

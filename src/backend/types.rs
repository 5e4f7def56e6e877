//! Wire types for the workflow backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::action::ActionPayload;
use crate::schema::SchemaDocument;

/// Outbound action submission. The payload travels verbatim; the envelope
/// adds the conversation routing and a client timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,
    pub action: ActionPayload,
    pub sent_at: DateTime<Utc>,
}

impl ActionRequest {
    pub fn new(
        conversation_id: impl Into<String>,
        screen_id: Option<String>,
        action: ActionPayload,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            screen_id,
            action,
            sent_at: Utc::now(),
        }
    }
}

/// Inbound reply: the next screen to render, plus optional workflow hints.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenResponse {
    pub conversation_id: String,
    #[serde(default)]
    pub next_action_id: Option<String>,
    pub screen: SchemaDocument,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_request_serializes_payload_verbatim() {
        let action = ActionPayload::new("submit_phone").with_value(json!("+2547000001"));
        let request = ActionRequest::new("conv-1", Some("screen-2".into()), action);
        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["conversation_id"], "conv-1");
        assert_eq!(wire["screen_id"], "screen-2");
        assert_eq!(wire["action"]["action_id"], "submit_phone");
        assert_eq!(wire["action"]["value"], "+2547000001");
        assert!(wire["sent_at"].is_string());
    }

    #[test]
    fn test_action_request_omits_missing_screen_id() {
        let request = ActionRequest::new("conv-1", None, ActionPayload::new("start"));
        let wire = serde_json::to_value(&request).unwrap();
        assert!(wire.get("screen_id").is_none());
    }

    #[test]
    fn test_screen_response_parses_nested_schema() {
        let response: ScreenResponse = serde_json::from_value(json!({
            "conversation_id": "conv-9",
            "screen": {
                "id": "doc-1",
                "screen_id": "welcome",
                "ui_components": [
                    {"id": "t", "component_type": "text", "properties": {"text": "hi"}}
                ]
            }
        }))
        .unwrap();
        assert_eq!(response.conversation_id, "conv-9");
        assert!(response.next_action_id.is_none());
        assert_eq!(response.screen.components.len(), 1);
    }
}

//! # Action Dispatch Bridge
//!
//! Every interaction in a rendered screen becomes an [`ActionPayload`]:
//! a button press, a selector change, an auto-trigger timer firing. Widgets
//! and timers push payloads into an [`ActionSender`]; the screen owner drains
//! the other end and forwards them to the workflow backend.
//!
//! The bridge treats payloads as opaque cargo. It never interprets, reorders,
//! or deduplicates them — a timer dispatch and a user click may arrive back
//! to back and both are forwarded.

use std::sync::mpsc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What should happen when a widget or timer fires.
///
/// Parsed from a node's `action` property, which may be a bare action-id
/// string or an object carrying routing hints for the workflow engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionPayload {
    pub action_id: String,
    /// Discriminator like "navigate", "submit_form", "button_click".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    /// The action the backend is expected to serve next on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action_id: Option<String>,
    /// Sibling field ids whose current values should travel with this action.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collect_fields: Vec<String>,
    /// Value the originating widget attached (input text, selected option).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Collected sibling field values, filled in by the screen owner.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
}

impl ActionPayload {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            action_type: None,
            next_action_id: None,
            collect_fields: Vec::new(),
            value: None,
            fields: Map::new(),
        }
    }

    /// Parse a node's `action` property. A bare string is an action id;
    /// an object must carry at least `action_id`.
    pub fn from_property(value: &Value) -> Option<Self> {
        match value {
            Value::String(id) => Some(Self::new(id.clone())),
            Value::Object(map) => {
                let action_id = map.get("action_id").and_then(Value::as_str)?.to_string();
                let as_string =
                    |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                let collect_fields = map
                    .get("collect_fields")
                    .and_then(Value::as_array)
                    .map(|ids| {
                        ids.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Self {
                    action_id,
                    action_type: as_string("type"),
                    next_action_id: as_string("next_action_id"),
                    collect_fields,
                    value: None,
                    fields: Map::new(),
                })
            }
            _ => None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Clonable sending half of the bridge, threaded from the screen owner
/// through the interpreter into interactive leaves and trigger timers.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: mpsc::Sender<ActionPayload>,
}

impl ActionSender {
    pub fn channel() -> (ActionSender, mpsc::Receiver<ActionPayload>) {
        let (tx, rx) = mpsc::channel();
        (ActionSender { tx }, rx)
    }

    /// Forward a payload to the screen owner. A dropped receiver means the
    /// screen is being torn down; the payload is discarded with a warning.
    pub fn dispatch(&self, payload: ActionPayload) {
        debug!("dispatching action \"{}\"", payload.action_id);
        if self.tx.send(payload).is_err() {
            warn!("action receiver dropped; payload discarded");
        }
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::mpsc::Receiver;

use serde_json::Value;

use crate::core::action::{ActionPayload, ActionSender};
use crate::schema::{ComponentNode, SchemaDocument};

/// A childless component node from inline JSON properties.
pub fn node(id: &str, component_type: &str, properties: Value) -> ComponentNode {
    let properties = match properties {
        Value::Object(map) => map,
        _ => panic!("properties must be a JSON object"),
    };
    ComponentNode {
        id: id.to_string(),
        component_type: component_type.to_string(),
        properties,
        children: Vec::new(),
    }
}

/// A document wrapping the given top-level nodes.
pub fn doc(components: Vec<ComponentNode>) -> SchemaDocument {
    SchemaDocument {
        id: "test-doc".to_string(),
        screen_id: Some("test-screen".to_string()),
        components,
    }
}

/// A fresh action bridge with its receiving end.
pub fn sink() -> (ActionSender, Receiver<ActionPayload>) {
    ActionSender::channel()
}

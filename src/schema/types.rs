//! # Schema Documents
//!
//! The wire model for one screen: a `SchemaDocument` holding an ordered tree
//! of `ComponentNode`s. Documents arrive from the workflow backend, are
//! immutable once parsed, and are wholly replaced (never merged) when the
//! next workflow step arrives.
//!
//! Backends are inconsistent about the component list key, so a document is
//! accepted in three shapes: `{"ui_components": [...]}`, `{"components": [...]}`,
//! or a bare top-level array.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker type for non-visual auto-trigger nodes.
pub const TRIGGER_TYPE: &str = "action";

/// One element of the component tree: either a container (layout kinds with
/// `children`) or a leaf (renders exactly one widget).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComponentNode {
    /// Unique within the document; used as the render key.
    #[serde(default)]
    pub id: String,
    /// Resolved against the component registry. Two naming conventions
    /// (`TextInput` / `text_input`) must resolve identically.
    pub component_type: String,
    /// Open-ended style and behavior attributes.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Nested nodes; only meaningful on container kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    /// True for non-visual nodes that only carry a deferred action trigger.
    pub fn is_trigger(&self) -> bool {
        self.component_type == TRIGGER_TYPE
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// The root payload for one rendered screen.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_id: Option<String>,
    pub components: Vec<ComponentNode>,
}

impl SchemaDocument {
    /// A document with no components at all.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            screen_id: None,
            components: Vec::new(),
        }
    }

    /// Top-level nodes that render visually (everything except triggers).
    pub fn visual_components(&self) -> impl Iterator<Item = &ComponentNode> {
        self.components.iter().filter(|n| !n.is_trigger())
    }

    /// Top-level auto-trigger nodes.
    pub fn trigger_components(&self) -> impl Iterator<Item = &ComponentNode> {
        self.components.iter().filter(|n| n.is_trigger())
    }

    /// Parse a document from raw JSON text.
    pub fn from_str(text: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text).map_err(|e| SchemaError::Invalid(e.to_string()))
    }

    /// Parse a document from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::Invalid(e.to_string()))
    }
}

/// A structurally unusable document (no resolvable node list). This is a
/// whole-screen condition, distinct from the per-node unknown-type case.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    Invalid(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Invalid(msg) => write!(f, "invalid schema: {msg}"),
        }
    }
}

impl std::error::Error for SchemaError {}

/// The three accepted wire shapes. Untagged: the object arm matches any JSON
/// object, so the "no component list" case is caught in the conversion below.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentRepr {
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        screen_id: Option<String>,
        #[serde(default)]
        ui_components: Option<Vec<ComponentNode>>,
        #[serde(default)]
        components: Option<Vec<ComponentNode>>,
    },
    Bare(Vec<ComponentNode>),
}

impl<'de> Deserialize<'de> for SchemaDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match DocumentRepr::deserialize(deserializer)? {
            DocumentRepr::Object {
                id,
                screen_id,
                ui_components,
                components,
            } => {
                let components = ui_components.or(components).ok_or_else(|| {
                    de::Error::custom(
                        "no component list found (expected \"ui_components\" or \"components\")",
                    )
                })?;
                Ok(SchemaDocument {
                    id: id.unwrap_or_default(),
                    screen_id,
                    components,
                })
            }
            DocumentRepr::Bare(components) => Ok(SchemaDocument {
                id: String::new(),
                screen_id: None,
                components,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ui_components_shape() {
        let doc = SchemaDocument::from_value(json!({
            "id": "kyc-1",
            "screen_id": "identity",
            "ui_components": [
                {"id": "t1", "component_type": "text", "properties": {"text": "Hi"}}
            ]
        }))
        .unwrap();
        assert_eq!(doc.id, "kyc-1");
        assert_eq!(doc.screen_id.as_deref(), Some("identity"));
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.components[0].component_type, "text");
    }

    #[test]
    fn test_parse_components_shape() {
        let doc = SchemaDocument::from_value(json!({
            "id": "loan-2",
            "components": [
                {"id": "b1", "component_type": "button", "properties": {"text": "Next"}}
            ]
        }))
        .unwrap();
        assert_eq!(doc.components.len(), 1);
        assert_eq!(doc.components[0].id, "b1");
    }

    #[test]
    fn test_parse_bare_array_shape() {
        let doc = SchemaDocument::from_value(json!([
            {"id": "a", "component_type": "text"},
            {"id": "b", "component_type": "divider"}
        ]))
        .unwrap();
        assert_eq!(doc.id, "");
        assert_eq!(doc.components.len(), 2);
    }

    #[test]
    fn test_missing_component_list_is_an_error() {
        let result = SchemaDocument::from_value(json!({"id": "broken"}));
        assert!(matches!(result, Err(SchemaError::Invalid(_))));
    }

    #[test]
    fn test_nested_children_parse() {
        let doc = SchemaDocument::from_value(json!({
            "id": "s",
            "components": [{
                "id": "col",
                "component_type": "column",
                "children": [
                    {"id": "t", "component_type": "text", "properties": {"text": "x"}},
                    {"id": "row", "component_type": "row", "children": [
                        {"id": "b", "component_type": "button"}
                    ]}
                ]
            }]
        }))
        .unwrap();
        let col = &doc.components[0];
        assert_eq!(col.children.len(), 2);
        assert_eq!(col.children[1].children[0].id, "b");
    }

    #[test]
    fn test_visual_and_trigger_partition() {
        let doc = SchemaDocument::from_value(json!({
            "id": "s",
            "components": [
                {"id": "t", "component_type": "text", "properties": {"text": "x"}},
                {"id": "auto", "component_type": "action",
                 "properties": {"trigger_delay": 1500, "action": {"action_id": "advance"}}}
            ]
        }))
        .unwrap();
        assert_eq!(doc.visual_components().count(), 1);
        assert_eq!(doc.trigger_components().count(), 1);
        assert!(doc.components[1].is_trigger());
    }

    #[test]
    fn test_properties_default_to_empty() {
        let doc = SchemaDocument::from_value(json!({
            "id": "s",
            "components": [{"id": "d", "component_type": "divider"}]
        }))
        .unwrap();
        assert!(doc.components[0].properties.is_empty());
        assert!(doc.components[0].children.is_empty());
    }
}

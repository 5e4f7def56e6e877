//! # Tree Interpreter
//!
//! Walks a schema document's component tree and resolves every node through
//! the registry into a [`Rendered`] tree: layout containers, constructed leaf
//! widgets, or inline error placeholders.
//!
//! Failure semantics: nothing here throws across node boundaries. An unknown
//! `component_type` or a failed widget construction becomes a visible
//! [`Rendered::Error`] in place of that node, and every sibling renders
//! normally. Silent dropping is deliberately avoided — a backend typo should
//! be seen, not swallowed.

use log::warn;
use serde_json::{Map, Value};

use crate::core::action::ActionSender;
use crate::render::widgets::{self, LeafWidget};
use crate::schema::style::STYLE_KEYS;
use crate::schema::{
    ComponentKind, ComponentNode, FlexDirection, HostStyle, SchemaDocument, translate,
};

/// Output of interpreting one component node.
pub enum Rendered {
    /// A layout pseudo-kind wrapping its children in schema order.
    Container {
        id: String,
        direction: FlexDirection,
        style: HostStyle,
        children: Vec<Rendered>,
    },
    /// A successfully constructed leaf widget.
    Leaf {
        id: String,
        kind: ComponentKind,
        style: HostStyle,
        widget: Box<dyn LeafWidget>,
    },
    /// Fail-visible placeholder rendered in place of a broken node.
    Error { id: String, message: String },
}

impl Rendered {
    pub fn is_error(&self) -> bool {
        matches!(self, Rendered::Error { .. })
    }

    pub fn id(&self) -> &str {
        match self {
            Rendered::Container { id, .. }
            | Rendered::Leaf { id, .. }
            | Rendered::Error { id, .. } => id,
        }
    }
}

/// Interpret one node. Total: every input yields something renderable.
pub fn render_node(node: &ComponentNode, sink: &ActionSender) -> Rendered {
    let Some(kind) = ComponentKind::resolve(&node.component_type) else {
        warn!(
            "unknown component type \"{}\" (node \"{}\")",
            node.component_type, node.id
        );
        return Rendered::Error {
            id: node.id.clone(),
            message: format!("unknown component type \"{}\"", node.component_type),
        };
    };

    if let Some(direction) = kind.layout_direction() {
        return Rendered::Container {
            id: node.id.clone(),
            direction,
            style: translate(&node.properties),
            // Schema order is visual order: no reordering, no dedup by id.
            children: node
                .children
                .iter()
                .map(|child| render_node(child, sink))
                .collect(),
        };
    }

    let style = translate(&node.properties);
    let props = widget_props(&node.properties);
    // Only allow-listed kinds get the dispatch callback.
    let on_action = kind.is_interactive().then(|| sink.clone());

    match widgets::build(kind, &props, style.clone(), on_action) {
        Ok(widget) => Rendered::Leaf {
            id: node.id.clone(),
            kind,
            style,
            widget,
        },
        // Per-leaf containment: a widget that fails to construct renders as
        // an inline placeholder and siblings are untouched.
        Err(e) => {
            warn!("component \"{}\" failed to load: {e}", node.id);
            Rendered::Error {
                id: node.id.clone(),
                message: format!("{} failed to load: {e}", node.component_type),
            }
        }
    }
}

/// Interpret the visual subset of a document's top-level nodes. Auto-trigger
/// nodes are excluded; an empty result is legitimate (a schema may consist
/// solely of triggers) and renders nothing.
pub fn render_screen(doc: &SchemaDocument, sink: &ActionSender) -> Vec<Rendered> {
    doc.visual_components()
        .map(|node| render_node(node, sink))
        .collect()
}

/// The pass-through widget configuration: everything except the style-only
/// vocabulary. A key is either translated style or raw widget config, never
/// both.
pub(crate) fn widget_props(props: &Map<String, Value>) -> Map<String, Value> {
    props
        .iter()
        .filter(|(key, _)| !STYLE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::event::UiEvent;
    use crate::test_support::{doc, node, sink};
    use serde_json::json;

    #[test]
    fn test_dual_naming_renders_equivalently() {
        let (tx, _rx) = sink();
        let props = json!({"text": "Go", "action": {"action_id": "x"}});
        let capitalized = render_node(&node("b1", "Button", props.clone()), &tx);
        let snake = render_node(&node("b1", "button", props), &tx);
        match (capitalized, snake) {
            (Rendered::Leaf { kind: a, .. }, Rendered::Leaf { kind: b, .. }) => {
                assert_eq!(a, ComponentKind::Button);
                assert_eq!(a, b);
            }
            _ => panic!("both spellings must produce leaves"),
        }
    }

    #[test]
    fn test_container_preserves_child_order() {
        let (tx, _rx) = sink();
        let labels = ["first", "second", "third", "fourth"];
        let children: Vec<_> = labels
            .iter()
            .map(|l| node(l, "text", json!({"text": l})))
            .collect();
        let mut column = node("col", "column", json!({}));
        column.children = children;

        let rendered = render_node(&column, &tx);
        let Rendered::Container { children, direction, .. } = rendered else {
            panic!("column must render as a container");
        };
        assert_eq!(direction, FlexDirection::Column);
        let ids: Vec<&str> = children.iter().map(Rendered::id).collect();
        assert_eq!(ids, labels);

        // Permuting the input permutes the output identically
        let mut reversed = node("col", "column", json!({}));
        reversed.children = labels
            .iter()
            .rev()
            .map(|l| node(l, "text", json!({"text": l})))
            .collect();
        let Rendered::Container { children, .. } = render_node(&reversed, &tx) else {
            panic!("expected container");
        };
        let ids: Vec<&str> = children.iter().map(Rendered::id).collect();
        assert_eq!(ids, vec!["fourth", "third", "second", "first"]);
    }

    #[test]
    fn test_unknown_type_is_contained() {
        let (tx, _rx) = sink();
        let mut column = node("col", "column", json!({}));
        column.children = vec![
            node("a", "text", json!({"text": "a"})),
            node("mystery", "hologram", json!({})),
            node("b", "text", json!({"text": "b"})),
        ];
        let Rendered::Container { children, .. } = render_node(&column, &tx) else {
            panic!("expected container");
        };
        assert_eq!(children.len(), 3);
        assert!(!children[0].is_error());
        assert!(children[1].is_error());
        assert!(!children[2].is_error());
        match &children[1] {
            Rendered::Error { message, .. } => assert!(message.contains("hologram")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_failed_widget_construction_is_contained() {
        let (tx, _rx) = sink();
        // Text without its required "text" property fails its load boundary
        let rendered = render_node(&node("t", "text", json!({})), &tx);
        assert!(rendered.is_error());
    }

    #[test]
    fn test_interactive_leaves_dispatch_passive_leaves_do_not() {
        let (tx, rx) = sink();
        // A button (allow-listed) dispatches on activation
        let button = render_node(
            &node("b", "button", json!({"text": "Go", "action": "go"})),
            &tx,
        );
        let Rendered::Leaf { mut widget, .. } = button else {
            panic!("expected leaf");
        };
        widget.handle_event(&UiEvent::Activate);
        assert_eq!(rx.try_recv().unwrap().action_id, "go");

        // A text node (not allow-listed) never dispatches, even with an
        // action-looking property in its config
        let text = render_node(
            &node("t", "text", json!({"text": "hi", "action": "nope"})),
            &tx,
        );
        let Rendered::Leaf { mut widget, .. } = text else {
            panic!("expected leaf");
        };
        widget.handle_event(&UiEvent::Activate);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_widget_props_strip_exactly_the_style_vocabulary() {
        let props = match json!({
            "text": "Hello",
            "padding": "16dp",
            "text_color": "#ffffff",
            "action": {"action_id": "x"},
            "custom_flag": true
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let filtered = widget_props(&props);
        assert!(filtered.contains_key("text"));
        assert!(filtered.contains_key("action"));
        assert!(filtered.contains_key("custom_flag"));
        assert!(!filtered.contains_key("padding"));
        assert!(!filtered.contains_key("text_color"));
    }

    #[test]
    fn test_trigger_only_schema_renders_nothing() {
        let (tx, _rx) = sink();
        let document = doc(vec![node(
            "auto",
            "action",
            json!({"trigger_delay": 1000, "action": {"action_id": "advance"}}),
        )]);
        assert!(render_screen(&document, &tx).is_empty());
    }

    #[test]
    fn test_end_to_end_column_text_button() {
        let (tx, rx) = sink();
        let mut column = node("root", "column", json!({}));
        column.children = vec![
            node("greeting", "text", json!({"text": "Hello"})),
            node("go", "button", json!({"text": "Go", "action": {"action_id": "x"}})),
        ];
        let document = doc(vec![column]);

        let mut tree = render_screen(&document, &tx);
        assert_eq!(tree.len(), 1);
        let Rendered::Container { direction, children, .. } = &mut tree[0] else {
            panic!("root must be a container");
        };
        assert_eq!(*direction, FlexDirection::Column);
        assert_eq!(children.len(), 2);
        assert!(matches!(
            children[0],
            Rendered::Leaf { kind: ComponentKind::Text, .. }
        ));
        let Rendered::Leaf { kind, widget, .. } = &mut children[1] else {
            panic!("second child must be a leaf");
        };
        assert_eq!(*kind, ComponentKind::Button);
        widget.handle_event(&UiEvent::Activate);
        assert_eq!(rx.try_recv().unwrap().action_id, "x");
    }
}

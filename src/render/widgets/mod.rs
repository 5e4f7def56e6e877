//! # Leaf Widget Library
//!
//! Concrete renderable units behind the interpreter's narrow calling
//! convention: `(props, style, Option<ActionSender>) -> widget`. The
//! interpreter knows nothing about any widget's internals; it only builds
//! them through [`build`] and draws them through [`LeafWidget`].
//!
//! Each widget exclusively owns its transient state (typed text, checked
//! flag, selection). That state is discarded when the schema is replaced.

mod button;
mod capture;
mod choice;
mod display;
mod input;

use std::fmt;

use ratatui::Frame;
use ratatui::layout::Rect;
use serde_json::{Map, Value};

use crate::core::action::{ActionPayload, ActionSender};
use crate::render::event::UiEvent;
use crate::schema::{ComponentKind, HostStyle};

pub use button::Button;
pub use capture::Capture;
pub use choice::{Checkbox, RadioGroup, Selector};
pub use display::{AudioPlayer, Divider, Image, ProgressBar, Table, TextBlock};
pub use input::{DatePicker, OtpInput, TextInput};

/// A renderable unit produced by the registry for one leaf node.
pub trait LeafWidget {
    /// Rows this widget needs at the given width.
    fn height(&self, width: u16) -> u16;

    /// Render into the given area. `focused` marks the widget holding
    /// keyboard focus.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Handle an input event while focused. Returns true if consumed.
    fn handle_event(&mut self, event: &UiEvent) -> bool {
        let _ = event;
        false
    }

    /// Current form value, used for sibling field collection.
    fn current_value(&self) -> Option<Value> {
        None
    }
}

/// A leaf that could not be constructed from its properties. Contained to
/// that leaf: the interpreter renders an inline placeholder and siblings
/// are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    MissingProperty(&'static str),
    InvalidProperty {
        key: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::MissingProperty(key) => write!(f, "missing property \"{key}\""),
            WidgetError::InvalidProperty { key, expected } => {
                write!(f, "property \"{key}\" is not {expected}")
            }
        }
    }
}

impl std::error::Error for WidgetError {}

/// Construct the widget for a resolved leaf kind.
///
/// `on_action` is `Some` only for kinds on the interactive allow-list; the
/// interpreter decides, widgets just carry what they are given.
pub fn build(
    kind: ComponentKind,
    props: &Map<String, Value>,
    style: HostStyle,
    on_action: Option<ActionSender>,
) -> Result<Box<dyn LeafWidget>, WidgetError> {
    match kind {
        ComponentKind::Text => Ok(Box::new(TextBlock::new(props, style)?)),
        ComponentKind::Image => Ok(Box::new(Image::new(props, style))),
        ComponentKind::Divider => Ok(Box::new(Divider::new(style))),
        ComponentKind::Table => Ok(Box::new(Table::new(props, style)?)),
        ComponentKind::ProgressBar => Ok(Box::new(ProgressBar::new(props, style))),
        ComponentKind::AudioPlayer => Ok(Box::new(AudioPlayer::new(props, style))),
        ComponentKind::TextInput => Ok(Box::new(TextInput::new(props, style, on_action))),
        ComponentKind::Button => Ok(Box::new(Button::new(props, style, on_action)?)),
        ComponentKind::Selector => Ok(Box::new(Selector::new(props, style, on_action)?)),
        ComponentKind::Checkbox => Ok(Box::new(Checkbox::new(props, style, on_action)?)),
        ComponentKind::RadioGroup => Ok(Box::new(RadioGroup::new(props, style, on_action)?)),
        ComponentKind::DatePicker => Ok(Box::new(DatePicker::new(props, style, on_action))),
        ComponentKind::OtpInput => Ok(Box::new(OtpInput::new(props, style, on_action))),
        ComponentKind::FileUpload => {
            Ok(Box::new(Capture::new("attach file", props, style, on_action)))
        }
        ComponentKind::ImageCapture => {
            Ok(Box::new(Capture::new("capture photo", props, style, on_action)))
        }
        ComponentKind::FingerprintScanner => Ok(Box::new(Capture::new(
            "scan fingerprint",
            props,
            style,
            on_action,
        ))),
        // Layout kinds are rendered by the interpreter, never built as leaves.
        ComponentKind::Column | ComponentKind::Row | ComponentKind::Container => {
            unreachable!("layout kinds are handled by the interpreter")
        }
    }
}

// ============================================================================
// Shared property helpers
// ============================================================================

pub(crate) fn prop_str(props: &Map<String, Value>, key: &str) -> Option<String> {
    props.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn require_str(
    props: &Map<String, Value>,
    key: &'static str,
) -> Result<String, WidgetError> {
    match props.get(key) {
        None => Err(WidgetError::MissingProperty(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(WidgetError::InvalidProperty {
            key,
            expected: "a string",
        }),
    }
}

/// Parse the node's `action` property, if present and well-formed.
pub(crate) fn prop_action(props: &Map<String, Value>) -> Option<ActionPayload> {
    let value = props.get("action")?;
    let payload = ActionPayload::from_property(value);
    if payload.is_none() {
        log::warn!("unparseable action property: {value}");
    }
    payload
}

/// Option labels from an `options` array of strings or `{"label": ...}` objects.
pub(crate) fn prop_options(props: &Map<String, Value>) -> Vec<String> {
    props
        .get("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| match o {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(m) => m.get("label").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Standard bordered frame for interactive widgets. Focus brightens the
/// border the way selection does elsewhere; unfocused widgets are dimmed.
pub(crate) fn frame_block<'a>(
    title: &'a str,
    style: &HostStyle,
    focused: bool,
) -> ratatui::widgets::Block<'a> {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::widgets::{Block, BorderType};

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let border_type = match style.corner_radius.as_ref().and_then(crate::schema::Dim::cells) {
        Some(r) if r > 0 => BorderType::Rounded,
        _ => BorderType::Plain,
    };
    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .title_style(border_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_build_fails_visibly_for_missing_required_props() {
        // Text requires "text"; the failure is an error value, not a panic.
        let result = build(
            ComponentKind::Text,
            &Map::new(),
            HostStyle::default(),
            None,
        );
        assert_eq!(result.err(), Some(WidgetError::MissingProperty("text")));
    }

    #[test]
    fn test_prop_options_mixed_shapes() {
        let p = props(json!({"options": ["Cash", {"label": "Transfer"}, 42]}));
        assert_eq!(prop_options(&p), vec!["Cash", "Transfer"]);
    }

    #[test]
    fn test_prop_action_malformed_is_none() {
        let p = props(json!({"action": {"type": "navigate"}}));
        assert!(prop_action(&p).is_none());
    }
}

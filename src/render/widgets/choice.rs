//! Selection widgets: checkbox, radio group, and the cycling selector.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use serde_json::{Map, Value, json};

use crate::core::action::{ActionPayload, ActionSender};
use crate::render::event::UiEvent;
use crate::render::widgets::{
    LeafWidget, WidgetError, frame_block, prop_action, prop_options, prop_str, require_str,
};
use crate::schema::HostStyle;

// ============================================================================
// Checkbox
// ============================================================================

/// A single toggle. Activation flips it and dispatches the action (if any)
/// with the new boolean value.
pub struct Checkbox {
    label: String,
    checked: bool,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl Checkbox {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Result<Self, WidgetError> {
        Ok(Self {
            label: require_str(props, "label")?,
            checked: props
                .get("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            action: prop_action(props),
            on_action,
            style,
        })
    }
}

impl LeafWidget for Checkbox {
    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let mark = if self.checked { "[x]" } else { "[ ]" };
        let mut style = self.style.text_style();
        if focused {
            style = style.fg(Color::Cyan);
        }
        frame.render_widget(
            Paragraph::new(format!("{mark} {}", self.label)).style(style),
            area,
        );
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Activate | UiEvent::InputChar(' ') => {
                self.checked = !self.checked;
                if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
                    sink.dispatch(action.clone().with_value(json!(self.checked)));
                }
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.checked))
    }
}

// ============================================================================
// RadioGroup
// ============================================================================

/// One-of-many selection rendered as a vertical list. Up/Down move the
/// selection; Enter dispatches the selected label.
pub struct RadioGroup {
    label: String,
    options: Vec<String>,
    selected: usize,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl RadioGroup {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Result<Self, WidgetError> {
        let options = prop_options(props);
        if options.is_empty() {
            return Err(WidgetError::InvalidProperty {
                key: "options",
                expected: "a non-empty array",
            });
        }
        Ok(Self {
            label: prop_str(props, "label").unwrap_or_default(),
            options,
            selected: 0,
            action: prop_action(props),
            on_action,
            style,
        })
    }
}

impl LeafWidget for RadioGroup {
    fn height(&self, _width: u16) -> u16 {
        self.options.len() as u16 + 2
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block(self.label.as_str(), &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = if i == self.selected { "(•)" } else { "( )" };
                let mut style = self.style.text_style();
                if focused && i == self.selected {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::styled(format!("{mark} {option}"), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            UiEvent::Down => {
                if self.selected + 1 < self.options.len() {
                    self.selected += 1;
                }
                true
            }
            UiEvent::Activate => {
                if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
                    sink.dispatch(
                        action
                            .clone()
                            .with_value(json!(self.options[self.selected])),
                    );
                }
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.options[self.selected]))
    }
}

// ============================================================================
// Selector
// ============================================================================

/// Compact one-of-many selection; Left/Right cycle through options inline.
pub struct Selector {
    label: String,
    options: Vec<String>,
    selected: usize,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl Selector {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Result<Self, WidgetError> {
        let options = prop_options(props);
        if options.is_empty() {
            return Err(WidgetError::InvalidProperty {
                key: "options",
                expected: "a non-empty array",
            });
        }
        Ok(Self {
            label: prop_str(props, "label").unwrap_or_default(),
            options,
            selected: 0,
            action: prop_action(props),
            on_action,
            style,
        })
    }
}

impl LeafWidget for Selector {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block(self.label.as_str(), &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let arrows_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let line = Line::from(vec![
            ratatui::text::Span::styled("◂ ", arrows_style),
            ratatui::text::Span::styled(
                self.options[self.selected].as_str(),
                self.style.text_style(),
            ),
            ratatui::text::Span::styled(" ▸", arrows_style),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::Left => {
                self.selected = self
                    .selected
                    .checked_sub(1)
                    .unwrap_or(self.options.len() - 1);
                true
            }
            UiEvent::Right => {
                self.selected = (self.selected + 1) % self.options.len();
                true
            }
            UiEvent::Activate => {
                if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
                    sink.dispatch(
                        action
                            .clone()
                            .with_value(json!(self.options[self.selected])),
                    );
                }
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.options[self.selected]))
    }
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
    fn test_checkbox_toggles_and_dispatches() {
        let (sink, rx) = ActionSender::channel();
        let mut checkbox = Checkbox::new(
            &props(json!({"label": "I agree", "action": "consent_given"})),
            HostStyle::default(),
            Some(sink),
        )
        .unwrap();
        checkbox.handle_event(&UiEvent::Activate);
        assert_eq!(checkbox.current_value(), Some(json!(true)));
        assert_eq!(rx.try_recv().unwrap().value, Some(json!(true)));
        checkbox.handle_event(&UiEvent::InputChar(' '));
        assert_eq!(rx.try_recv().unwrap().value, Some(json!(false)));
    }

    #[test]
    fn test_radio_group_navigation_clamps() {
        let mut radio = RadioGroup::new(
            &props(json!({"options": ["12 months", "24 months"]})),
            HostStyle::default(),
            None,
        )
        .unwrap();
        radio.handle_event(&UiEvent::Up);
        assert_eq!(radio.current_value(), Some(json!("12 months")));
        radio.handle_event(&UiEvent::Down);
        radio.handle_event(&UiEvent::Down);
        assert_eq!(radio.current_value(), Some(json!("24 months")));
    }

    #[test]
    fn test_radio_group_dispatches_selected_label() {
        let (sink, rx) = ActionSender::channel();
        let mut radio = RadioGroup::new(
            &props(json!({
                "options": ["Weekly", "Monthly"],
                "action": {"action_id": "pick_frequency"}
            })),
            HostStyle::default(),
            Some(sink),
        )
        .unwrap();
        radio.handle_event(&UiEvent::Down);
        radio.handle_event(&UiEvent::Activate);
        let payload = rx.try_recv().unwrap();
        assert_eq!(payload.action_id, "pick_frequency");
        assert_eq!(payload.value, Some(json!("Monthly")));
    }

    #[test]
    fn test_selector_cycles_wrapping() {
        let mut selector = Selector::new(
            &props(json!({"options": ["A", "B", "C"]})),
            HostStyle::default(),
            None,
        )
        .unwrap();
        selector.handle_event(&UiEvent::Left);
        assert_eq!(selector.current_value(), Some(json!("C")));
        selector.handle_event(&UiEvent::Right);
        assert_eq!(selector.current_value(), Some(json!("A")));
    }

    #[test]
    fn test_empty_options_fail_construction() {
        let result = Selector::new(&props(json!({"options": []})), HostStyle::default(), None);
        assert!(matches!(
            result,
            Err(WidgetError::InvalidProperty { key: "options", .. })
        ));
    }
}

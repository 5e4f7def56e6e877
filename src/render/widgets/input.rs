//! Text-entry widgets: free text, OTP codes, and dates. Each owns its typed
//! value; the interpreter never reads or mutates it directly.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use serde_json::{Map, Value, json};

use crate::core::action::{ActionPayload, ActionSender};
use crate::render::event::UiEvent;
use crate::render::widgets::{LeafWidget, frame_block, prop_action, prop_str};
use crate::schema::HostStyle;

// ============================================================================
// TextInput
// ============================================================================

/// Single-line text field. Enter dispatches the node's action with the
/// current value attached.
pub struct TextInput {
    label: String,
    placeholder: String,
    masked: bool,
    value: String,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl TextInput {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Self {
        Self {
            label: prop_str(props, "label").unwrap_or_default(),
            placeholder: prop_str(props, "placeholder").unwrap_or_default(),
            masked: props
                .get("masked")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            value: prop_str(props, "value").unwrap_or_default(),
            action: prop_action(props),
            on_action,
            style,
        }
    }

    fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

impl LeafWidget for TextInput {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block(self.label.as_str(), &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if self.value.is_empty() && !self.placeholder.is_empty() {
            frame.render_widget(
                Paragraph::new(self.placeholder.as_str())
                    .style(Style::default().add_modifier(Modifier::DIM)),
                inner,
            );
        } else {
            frame.render_widget(
                Paragraph::new(self.display_value()).style(self.style.text_style()),
                inner,
            );
        }
        if focused {
            let cursor_x = inner.x + self.value.chars().count().min(inner.width as usize) as u16;
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::InputChar(c) => {
                self.value.push(*c);
                true
            }
            UiEvent::Backspace => {
                self.value.pop();
                true
            }
            UiEvent::Activate => {
                if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
                    sink.dispatch(action.clone().with_value(json!(self.value)));
                }
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.value))
    }
}

// ============================================================================
// OtpInput
// ============================================================================

/// Fixed-length numeric one-time-passcode entry. Dispatches automatically
/// once every digit is filled.
pub struct OtpInput {
    length: usize,
    digits: String,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl OtpInput {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Self {
        let length = props
            .get("length")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(6);
        Self {
            length,
            digits: String::new(),
            action: prop_action(props),
            on_action,
            style,
        }
    }

    fn dispatch_if_complete(&self) {
        if self.digits.len() == self.length
            && let (Some(action), Some(sink)) = (&self.action, &self.on_action)
        {
            sink.dispatch(action.clone().with_value(json!(self.digits)));
        }
    }
}

impl LeafWidget for OtpInput {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block("one-time code", &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let cells: String = (0..self.length)
            .map(|i| self.digits.chars().nth(i).unwrap_or('·'))
            .flat_map(|c| [c, ' '])
            .collect();
        frame.render_widget(
            Paragraph::new(cells).style(self.style.text_style()),
            inner,
        );
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::InputChar(c) if c.is_ascii_digit() => {
                if self.digits.len() < self.length {
                    self.digits.push(*c);
                    self.dispatch_if_complete();
                }
                true
            }
            UiEvent::Backspace => {
                self.digits.pop();
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.digits))
    }
}

// ============================================================================
// DatePicker
// ============================================================================

/// ISO-date entry (`YYYY-MM-DD`). Enter validates before dispatching; an
/// invalid date shows inline and dispatches nothing.
pub struct DatePicker {
    label: String,
    value: String,
    invalid: bool,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl DatePicker {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Self {
        Self {
            label: prop_str(props, "label").unwrap_or_else(|| "date".to_string()),
            value: prop_str(props, "value").unwrap_or_default(),
            invalid: false,
            action: prop_action(props),
            on_action,
            style,
        }
    }

    fn parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.value, "%Y-%m-%d").ok()
    }
}

impl LeafWidget for DatePicker {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block(self.label.as_str(), &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let (text, text_style) = if self.value.is_empty() {
            (
                "YYYY-MM-DD".to_string(),
                Style::default().add_modifier(Modifier::DIM),
            )
        } else if self.invalid {
            (
                format!("{} (invalid date)", self.value),
                Style::default().fg(Color::Red),
            )
        } else {
            (self.value.clone(), self.style.text_style())
        };
        frame.render_widget(Paragraph::new(text).style(text_style), inner);
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event {
            UiEvent::InputChar(c) if c.is_ascii_digit() || *c == '-' => {
                if self.value.len() < 10 {
                    self.value.push(*c);
                    self.invalid = false;
                }
                true
            }
            UiEvent::Backspace => {
                self.value.pop();
                self.invalid = false;
                true
            }
            UiEvent::Activate => {
                match self.parsed() {
                    Some(date) => {
                        if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
                            sink.dispatch(
                                action.clone().with_value(json!(date.format("%Y-%m-%d").to_string())),
                            );
                        }
                    }
                    None => self.invalid = true,
                }
                true
            }
            _ => false,
        }
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.value))
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

    fn action_props() -> Map<String, Value> {
        props(json!({"action": {"action_id": "submit_value"}}))
    }

    #[test]
    fn test_text_input_collects_typed_value() {
        let mut input = TextInput::new(&Map::new(), HostStyle::default(), None);
        input.handle_event(&UiEvent::InputChar('h'));
        input.handle_event(&UiEvent::InputChar('i'));
        input.handle_event(&UiEvent::Backspace);
        assert_eq!(input.current_value(), Some(json!("h")));
    }

    #[test]
    fn test_text_input_enter_attaches_value() {
        let (sink, rx) = ActionSender::channel();
        let mut input = TextInput::new(&action_props(), HostStyle::default(), Some(sink));
        input.handle_event(&UiEvent::InputChar('a'));
        input.handle_event(&UiEvent::Activate);
        let payload = rx.try_recv().unwrap();
        assert_eq!(payload.action_id, "submit_value");
        assert_eq!(payload.value, Some(json!("a")));
    }

    #[test]
    fn test_otp_dispatches_when_complete() {
        let (sink, rx) = ActionSender::channel();
        let mut otp = OtpInput::new(
            &props(json!({"length": 4, "action": {"action_id": "verify_otp"}})),
            HostStyle::default(),
            Some(sink),
        );
        for c in "123".chars() {
            otp.handle_event(&UiEvent::InputChar(c));
        }
        assert!(rx.try_recv().is_err(), "must not dispatch before complete");
        otp.handle_event(&UiEvent::InputChar('4'));
        let payload = rx.try_recv().unwrap();
        assert_eq!(payload.value, Some(json!("1234")));
    }

    #[test]
    fn test_otp_rejects_non_digits() {
        let mut otp = OtpInput::new(&props(json!({"length": 4})), HostStyle::default(), None);
        assert!(!otp.handle_event(&UiEvent::InputChar('x')));
        assert_eq!(otp.current_value(), Some(json!("")));
    }

    #[test]
    fn test_date_picker_rejects_invalid_date() {
        let (sink, rx) = ActionSender::channel();
        let mut picker = DatePicker::new(&action_props(), HostStyle::default(), Some(sink));
        for c in "2026-13-99".chars() {
            picker.handle_event(&UiEvent::InputChar(c));
        }
        picker.handle_event(&UiEvent::Activate);
        assert!(picker.invalid);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_date_picker_dispatches_valid_date() {
        let (sink, rx) = ActionSender::channel();
        let mut picker = DatePicker::new(&action_props(), HostStyle::default(), Some(sink));
        for c in "1990-04-17".chars() {
            picker.handle_event(&UiEvent::InputChar(c));
        }
        picker.handle_event(&UiEvent::Activate);
        assert_eq!(rx.try_recv().unwrap().value, Some(json!("1990-04-17")));
    }
}

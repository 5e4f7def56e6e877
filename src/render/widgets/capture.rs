use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use serde_json::{Map, Value, json};

use crate::core::action::{ActionPayload, ActionSender};
use crate::render::event::UiEvent;
use crate::render::widgets::{LeafWidget, frame_block, prop_action, prop_str};
use crate::schema::HostStyle;

/// Placeholder for device-capture components (file upload, camera,
/// fingerprint). Real capture hardware is out of scope; the widget renders a
/// labelled frame and, on activation, dispatches the node's action marked as
/// a simulated capture so the workflow can still advance.
pub struct Capture {
    verb: &'static str,
    prompt: String,
    done: bool,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl Capture {
    pub fn new(
        verb: &'static str,
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Self {
        Self {
            verb,
            prompt: prop_str(props, "label").unwrap_or_else(|| verb.to_string()),
            done: false,
            action: prop_action(props),
            on_action,
            style,
        }
    }
}

impl LeafWidget for Capture {
    fn height(&self, _width: u16) -> u16 {
        4
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block(self.verb, &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let text = if self.done {
            format!("✓ {}", self.prompt)
        } else {
            format!("{} (press Enter)", self.prompt)
        };
        let style = if self.done {
            self.style.text_style()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(style),
            inner,
        );
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        if !matches!(event, UiEvent::Activate) {
            return false;
        }
        self.done = true;
        if let (Some(action), Some(sink)) = (&self.action, &self.on_action) {
            sink.dispatch(action.clone().with_value(json!({"simulated": true})));
        }
        true
    }

    fn current_value(&self) -> Option<Value> {
        Some(json!(self.done))
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use serde_json::{Map, Value};

use crate::core::action::{ActionPayload, ActionSender};
use crate::render::event::UiEvent;
use crate::render::widgets::{LeafWidget, WidgetError, frame_block, prop_action, require_str};
use crate::schema::HostStyle;

/// A labelled action button. Activating it dispatches the node's `action`
/// payload through the bridge, verbatim.
pub struct Button {
    label: String,
    action: Option<ActionPayload>,
    on_action: Option<ActionSender>,
    style: HostStyle,
}

impl Button {
    pub fn new(
        props: &Map<String, Value>,
        style: HostStyle,
        on_action: Option<ActionSender>,
    ) -> Result<Self, WidgetError> {
        Ok(Self {
            label: require_str(props, "text")?,
            action: prop_action(props),
            on_action,
            style,
        })
    }
}

impl LeafWidget for Button {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = frame_block("", &self.style, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let mut label_style = self.style.text_style();
        if focused {
            label_style = label_style.add_modifier(ratatui::style::Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(self.label.as_str())
                .alignment(self.style.text_alignment.unwrap_or(Alignment::Center))
                .style(label_style),
            inner,
        );
    }

    fn handle_event(&mut self, event: &UiEvent) -> bool {
        if !matches!(event, UiEvent::Activate) {
            return false;
        }
        match (&self.action, &self.on_action) {
            (Some(action), Some(sink)) => sink.dispatch(action.clone()),
            (None, _) => log::debug!("button \"{}\" has no action", self.label),
            (_, None) => {}
        }
        true
    }
}

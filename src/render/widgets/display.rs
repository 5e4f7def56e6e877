//! Non-interactive display widgets: text, images, dividers, tables,
//! progress bars, and the audio player placeholder. None of these ever
//! receive the action callback.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Gauge, Paragraph, Row, Wrap};
use serde_json::{Map, Value};

use crate::render::widgets::{LeafWidget, WidgetError, frame_block, prop_str, require_str};
use crate::schema::HostStyle;

// ============================================================================
// TextBlock
// ============================================================================

/// A block of wrapped text.
pub struct TextBlock {
    text: String,
    style: HostStyle,
}

impl TextBlock {
    pub fn new(props: &Map<String, Value>, style: HostStyle) -> Result<Self, WidgetError> {
        Ok(Self {
            text: require_str(props, "text")?,
            style,
        })
    }
}

impl LeafWidget for TextBlock {
    /// Predict wrapped height without rendering. The wrapping options must
    /// match ratatui's `Paragraph` defaults for a 1:1 height mapping.
    fn height(&self, width: u16) -> u16 {
        if width == 0 {
            return 1;
        }
        let content = self.text.trim();
        if content.is_empty() {
            return 1;
        }
        let options = textwrap::Options::new(width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        (textwrap::wrap(content, options).len() as u16).max(1)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let mut paragraph = Paragraph::new(self.text.trim())
            .style(self.style.text_style())
            .wrap(Wrap { trim: true });
        if let Some(alignment) = self.style.text_alignment {
            paragraph = paragraph.alignment(alignment);
        }
        frame.render_widget(paragraph, area);
    }
}

// ============================================================================
// Image
// ============================================================================

/// Terminal stand-in for an image: a frame showing the alt text (or source).
pub struct Image {
    caption: String,
    style: HostStyle,
}

impl Image {
    pub fn new(props: &Map<String, Value>, style: HostStyle) -> Self {
        let caption = prop_str(props, "alt")
            .or_else(|| prop_str(props, "url"))
            .unwrap_or_else(|| "image".to_string());
        Self { caption, style }
    }
}

impl LeafWidget for Image {
    fn height(&self, _width: u16) -> u16 {
        5
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let block = frame_block("image", &self.style, false);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let caption = Paragraph::new(self.caption.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(caption, inner);
    }
}

// ============================================================================
// Divider
// ============================================================================

pub struct Divider {
    style: HostStyle,
}

impl Divider {
    pub fn new(style: HostStyle) -> Self {
        Self { style }
    }
}

impl LeafWidget for Divider {
    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let line = "─".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(line).style(self.style.text_style().add_modifier(Modifier::DIM)),
            area,
        );
    }
}

// ============================================================================
// Table
// ============================================================================

/// Static data table from `columns` and `rows` properties.
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    style: HostStyle,
}

impl Table {
    pub fn new(props: &Map<String, Value>, style: HostStyle) -> Result<Self, WidgetError> {
        let columns = string_row(props.get("columns")).ok_or(WidgetError::InvalidProperty {
            key: "columns",
            expected: "an array of strings",
        })?;
        let rows = props
            .get("rows")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().filter_map(|r| string_row(Some(r))).collect())
            .unwrap_or_default();
        Ok(Self {
            columns,
            rows,
            style,
        })
    }
}

fn string_row(value: Option<&Value>) -> Option<Vec<String>> {
    let cells = value?.as_array()?;
    Some(
        cells
            .iter()
            .map(|c| match c {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

impl LeafWidget for Table {
    fn height(&self, _width: u16) -> u16 {
        // header + rows + borders
        self.rows.len() as u16 + 1 + 2
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let widths = vec![
            Constraint::Ratio(1, self.columns.len().max(1) as u32);
            self.columns.len().max(1)
        ];
        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(c.as_str()).style(Style::default().add_modifier(Modifier::BOLD))),
        );
        let rows = self
            .rows
            .iter()
            .map(|r| Row::new(r.iter().map(|c| Cell::from(c.as_str()))));
        let table = ratatui::widgets::Table::new(rows, widths)
            .header(header)
            .style(self.style.text_style())
            .block(frame_block("", &self.style, false));
        frame.render_widget(table, area);
    }
}

// ============================================================================
// ProgressBar
// ============================================================================

/// Horizontal progress indicator; `value` is 0–100.
pub struct ProgressBar {
    value: f64,
    label: Option<String>,
    style: HostStyle,
}

impl ProgressBar {
    pub fn new(props: &Map<String, Value>, style: HostStyle) -> Self {
        let value = props
            .get("value")
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
            .clamp(0.0, 100.0);
        Self {
            value,
            label: prop_str(props, "label"),
            style,
        }
    }
}

impl LeafWidget for ProgressBar {
    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| format!("{:.0}%", self.value));
        let gauge = Gauge::default()
            .ratio(self.value / 100.0)
            .label(label)
            .gauge_style(self.style.text_style());
        frame.render_widget(gauge, area);
    }
}

// ============================================================================
// AudioPlayer
// ============================================================================

/// Placeholder for server-hosted audio (voice notes in collections flows).
/// Playback itself is out of scope; this only shows what would play.
pub struct AudioPlayer {
    title: String,
    style: HostStyle,
}

impl AudioPlayer {
    pub fn new(props: &Map<String, Value>, style: HostStyle) -> Self {
        let title = prop_str(props, "title")
            .or_else(|| prop_str(props, "url"))
            .unwrap_or_else(|| "audio".to_string());
        Self { title, style }
    }
}

impl LeafWidget for AudioPlayer {
    fn height(&self, _width: u16) -> u16 {
        3
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let block = frame_block("audio", &self.style, false);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(format!("▸ {}", self.title)).style(self.style.text_style()),
            inner,
        );
    }
}

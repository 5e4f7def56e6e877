//! # Style Unit Translator
//!
//! Converts the schema's mobile-style property vocabulary (`"16dp"` padding,
//! `"18sp"` text sizes, hex colors, alignment keywords) into a [`HostStyle`]
//! the terminal widgets can consume.
//!
//! The translation is pure: the same property map always yields the same
//! `HostStyle`, and absent keys produce no entry (no defaults are injected).

use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use serde_json::{Map, Value};

/// Fixed divisor for suffixed units: `"16dp"` is one relative unit.
pub const UNIT_BASE: f32 = 16.0;

/// Property keys the translator owns. The interpreter strips exactly these
/// from a leaf's properties before passing the rest through as widget props,
/// so a key listed here must never reach a widget as raw configuration.
pub const STYLE_KEYS: &[&str] = &[
    "padding",
    "margin_bottom",
    "horizontal_alignment",
    "vertical_alignment",
    "background_color",
    "text_color",
    "text_alignment",
    "text_size",
    "text_style",
    "corner_radius",
];

/// A translated dimension value.
#[derive(Debug, Clone, PartialEq)]
pub enum Dim {
    /// Suffixed value divided by [`UNIT_BASE`]: `"32dp"` → `Units(2.0)`.
    Units(f32),
    /// Percentage of the parent: `"50%"` → `Percent(50.0)`.
    Percent(f32),
    /// Unsuffixed or unparseable value, passed through unchanged.
    Raw(String),
}

impl Dim {
    pub fn parse(value: &Value) -> Dim {
        match value {
            Value::String(s) => Self::parse_str(s),
            other => Dim::Raw(other.to_string()),
        }
    }

    fn parse_str(s: &str) -> Dim {
        if let Some(stripped) = s.strip_suffix("dp").or_else(|| s.strip_suffix("sp"))
            && let Ok(n) = stripped.trim().parse::<i64>()
        {
            return Dim::Units(n as f32 / UNIT_BASE);
        }
        if let Some(stripped) = s.strip_suffix('%')
            && let Ok(n) = stripped.trim().parse::<f32>()
        {
            return Dim::Percent(n);
        }
        Dim::Raw(s.to_string())
    }

    /// Rounded terminal cell count, for dimensions usable as spacing.
    /// Percentages and raw values have no fixed cell size.
    pub fn cells(&self) -> Option<u16> {
        match self {
            Dim::Units(u) => Some(u.round().max(0.0) as u16),
            _ => None,
        }
    }
}

/// Alignment keyword along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

impl Align {
    fn parse(s: &str) -> Option<Align> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "left" | "top" => Some(Align::Start),
            "center" | "middle" => Some(Align::Center),
            "end" | "right" | "bottom" => Some(Align::End),
            _ => None,
        }
    }
}

/// The host style object produced by [`translate`]. Every field is optional;
/// a `None` means the schema said nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostStyle {
    pub padding: Option<Dim>,
    pub margin_bottom: Option<Dim>,
    pub horizontal_alignment: Option<Align>,
    pub vertical_alignment: Option<Align>,
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub text_alignment: Option<Alignment>,
    pub text_size: Option<Dim>,
    pub bold: bool,
    pub italic: bool,
    pub corner_radius: Option<Dim>,
}

impl HostStyle {
    /// ratatui text style carrying color and emphasis.
    pub fn text_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.text_color {
            style = style.fg(fg);
        }
        if let Some(bg) = self.background_color {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    pub fn padding_cells(&self) -> u16 {
        self.padding.as_ref().and_then(Dim::cells).unwrap_or(0)
    }

    pub fn margin_bottom_cells(&self) -> u16 {
        self.margin_bottom.as_ref().and_then(Dim::cells).unwrap_or(0)
    }
}

/// Translate a component's property map into a host style object.
pub fn translate(props: &Map<String, Value>) -> HostStyle {
    let mut style = HostStyle::default();

    if let Some(v) = props.get("padding") {
        style.padding = Some(Dim::parse(v));
    }
    if let Some(v) = props.get("margin_bottom") {
        style.margin_bottom = Some(Dim::parse(v));
    }
    if let Some(s) = props.get("horizontal_alignment").and_then(Value::as_str) {
        style.horizontal_alignment = Align::parse(s);
    }
    if let Some(s) = props.get("vertical_alignment").and_then(Value::as_str) {
        style.vertical_alignment = Align::parse(s);
    }
    if let Some(s) = props.get("background_color").and_then(Value::as_str) {
        style.background_color = parse_color(s);
    }
    if let Some(s) = props.get("text_color").and_then(Value::as_str) {
        style.text_color = parse_color(s);
    }
    if let Some(s) = props.get("text_alignment").and_then(Value::as_str) {
        style.text_alignment = Align::parse(s).map(|a| match a {
            Align::Start => Alignment::Left,
            Align::Center => Alignment::Center,
            Align::End => Alignment::Right,
        });
    }
    if let Some(v) = props.get("text_size") {
        style.text_size = Some(Dim::parse(v));
    }
    if let Some(s) = props.get("text_style").and_then(Value::as_str) {
        for word in s.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                _ => {}
            }
        }
    }
    if let Some(v) = props.get("corner_radius") {
        style.corner_radius = Some(Dim::parse(v));
    }

    style
}

/// Parse `#RRGGBB` hex or a small set of named colors.
fn parse_color(s: &str) -> Option<Color> {
    if let Some(hex) = s.strip_prefix('#')
        && hex.len() == 6
        && let Ok(n) = u32::from_str_radix(hex, 16)
    {
        return Some(Color::Rgb(
            ((n >> 16) & 0xff) as u8,
            ((n >> 8) & 0xff) as u8,
            (n & 0xff) as u8,
        ));
    }
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

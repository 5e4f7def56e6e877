//! # Component Registry
//!
//! A closed mapping from schema-declared `component_type` strings to
//! renderable component kinds. Backend payloads use two naming conventions
//! interchangeably (capitalized `TextInput` and snake `text_input`), so each
//! kind keeps two entries resolving to the identical variant — a backend
//! compatibility requirement, not accidental duplication.
//!
//! Unknown types resolve to `None`; the interpreter renders those as inline
//! error placeholders rather than dropping them (fail-visible policy).

/// Flex direction of a layout pseudo-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Column,
    Row,
    /// Generic `Container`: default flex, which lays out like a row.
    Free,
}

/// Every component kind the renderer knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    // Layout pseudo-kinds: resolve to a flex primitive, not a leaf widget.
    Column,
    Row,
    Container,
    // Display leaves.
    Text,
    Image,
    Divider,
    Table,
    ProgressBar,
    AudioPlayer,
    // Interactive leaves.
    TextInput,
    Button,
    Selector,
    Checkbox,
    RadioGroup,
    FileUpload,
    ImageCapture,
    DatePicker,
    OtpInput,
    FingerprintScanner,
}

impl ComponentKind {
    /// Total lookup over both naming conventions. `None` is a recoverable
    /// per-node condition, never fatal.
    pub fn resolve(component_type: &str) -> Option<ComponentKind> {
        match component_type {
            "Column" | "column" => Some(Self::Column),
            "Row" | "row" => Some(Self::Row),
            "Container" | "container" => Some(Self::Container),
            "Text" | "text" => Some(Self::Text),
            "Image" | "image" => Some(Self::Image),
            "Divider" | "divider" => Some(Self::Divider),
            "Table" | "table" => Some(Self::Table),
            "ProgressBar" | "progress_bar" => Some(Self::ProgressBar),
            "AudioPlayer" | "audio_player" => Some(Self::AudioPlayer),
            "TextInput" | "text_input" => Some(Self::TextInput),
            "Button" | "button" => Some(Self::Button),
            "Selector" | "selector" => Some(Self::Selector),
            "Checkbox" | "checkbox" => Some(Self::Checkbox),
            "RadioGroup" | "radio_group" => Some(Self::RadioGroup),
            "FileUpload" | "file_upload" => Some(Self::FileUpload),
            "ImageCapture" | "image_capture" => Some(Self::ImageCapture),
            "DatePicker" | "date_picker" => Some(Self::DatePicker),
            "OtpInput" | "otp_input" => Some(Self::OtpInput),
            "FingerprintScanner" | "fingerprint_scanner" => Some(Self::FingerprintScanner),
            _ => None,
        }
    }

    /// Layout pseudo-kinds render as flex containers around their children.
    pub fn layout_direction(self) -> Option<FlexDirection> {
        match self {
            Self::Column => Some(FlexDirection::Column),
            Self::Row => Some(FlexDirection::Row),
            Self::Container => Some(FlexDirection::Free),
            _ => None,
        }
    }

    pub fn is_layout(self) -> bool {
        self.layout_direction().is_some()
    }

    /// The fixed allow-list of kinds that receive the action dispatch
    /// callback. Everything else never sees it.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::Button
                | Self::Selector
                | Self::Checkbox
                | Self::RadioGroup
                | Self::FileUpload
                | Self::ImageCapture
                | Self::DatePicker
                | Self::OtpInput
                | Self::FingerprintScanner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_naming_resolves_identically() {
        let pairs = [
            ("Column", "column"),
            ("Row", "row"),
            ("Container", "container"),
            ("Text", "text"),
            ("Image", "image"),
            ("Divider", "divider"),
            ("Table", "table"),
            ("ProgressBar", "progress_bar"),
            ("AudioPlayer", "audio_player"),
            ("TextInput", "text_input"),
            ("Button", "button"),
            ("Selector", "selector"),
            ("Checkbox", "checkbox"),
            ("RadioGroup", "radio_group"),
            ("FileUpload", "file_upload"),
            ("ImageCapture", "image_capture"),
            ("DatePicker", "date_picker"),
            ("OtpInput", "otp_input"),
            ("FingerprintScanner", "fingerprint_scanner"),
        ];
        for (cap, snake) in pairs {
            let a = ComponentKind::resolve(cap);
            let b = ComponentKind::resolve(snake);
            assert!(a.is_some(), "{cap} did not resolve");
            assert_eq!(a, b, "{cap} and {snake} resolve differently");
        }
    }

    #[test]
    fn test_unknown_type_resolves_to_none() {
        assert_eq!(ComponentKind::resolve("hologram"), None);
        assert_eq!(ComponentKind::resolve(""), None);
        // The trigger marker is not a renderable kind
        assert_eq!(ComponentKind::resolve("action"), None);
    }

    #[test]
    fn test_layout_pseudo_kinds() {
        assert_eq!(
            ComponentKind::resolve("column").unwrap().layout_direction(),
            Some(FlexDirection::Column)
        );
        assert_eq!(
            ComponentKind::resolve("row").unwrap().layout_direction(),
            Some(FlexDirection::Row)
        );
        assert_eq!(
            ComponentKind::resolve("Container").unwrap().layout_direction(),
            Some(FlexDirection::Free)
        );
        assert_eq!(ComponentKind::Button.layout_direction(), None);
    }

    #[test]
    fn test_interactive_allow_list() {
        let interactive = [
            ComponentKind::TextInput,
            ComponentKind::Button,
            ComponentKind::Selector,
            ComponentKind::Checkbox,
            ComponentKind::RadioGroup,
            ComponentKind::FileUpload,
            ComponentKind::ImageCapture,
            ComponentKind::DatePicker,
            ComponentKind::OtpInput,
            ComponentKind::FingerprintScanner,
        ];
        for kind in interactive {
            assert!(kind.is_interactive(), "{kind:?} should be interactive");
        }
        let passive = [
            ComponentKind::Column,
            ComponentKind::Row,
            ComponentKind::Container,
            ComponentKind::Text,
            ComponentKind::Image,
            ComponentKind::Divider,
            ComponentKind::Table,
            ComponentKind::ProgressBar,
            ComponentKind::AudioPlayer,
        ];
        for kind in passive {
            assert!(!kind.is_interactive(), "{kind:?} should not be interactive");
        }
    }
}

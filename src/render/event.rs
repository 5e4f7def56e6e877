use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// Terminal input events, already translated out of crossterm's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    /// Tab — move focus to the next interactive widget.
    FocusNext,
    /// Shift+Tab — move focus to the previous interactive widget.
    FocusPrev,
    /// Enter — activate the focused widget.
    Activate,
    InputChar(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event(timeout: Duration) -> Option<UiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("event poll failed: {e}");
            return None;
        }
    }
    let raw = match event::read() {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("event read failed: {e}");
            return None;
        }
    };
    match raw {
        Event::Key(key) => match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(UiEvent::Quit),
            (_, KeyCode::Esc) => Some(UiEvent::Quit),
            (_, KeyCode::Tab) => Some(UiEvent::FocusNext),
            (_, KeyCode::BackTab) => Some(UiEvent::FocusPrev),
            (_, KeyCode::Enter) => Some(UiEvent::Activate),
            (_, KeyCode::Char(c)) => Some(UiEvent::InputChar(c)),
            (_, KeyCode::Backspace) => Some(UiEvent::Backspace),
            (_, KeyCode::Up) => Some(UiEvent::Up),
            (_, KeyCode::Down) => Some(UiEvent::Down),
            (_, KeyCode::Left) => Some(UiEvent::Left),
            (_, KeyCode::Right) => Some(UiEvent::Right),
            _ => None,
        },
        Event::Resize(_, _) => Some(UiEvent::Resize),
        _ => None,
    }
}

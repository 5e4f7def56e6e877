//! # Screen Renderer
//!
//! The ratatui-specific layer. Owns the mounted screen, terminal I/O, focus
//! traversal, and the event loop that drives the whole
//! schema → widgets → action → backend → schema cycle.
//!
//! This is the only module that knows about the terminal. The interpreter and
//! widgets below it deal in trees and events; the backend above it deals in
//! JSON. Swapping this layer for a different host (web, native) would leave
//! the rest intact.

pub mod event;
pub mod interpreter;
pub mod trigger;
pub mod widgets;

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use serde_json::{Map, Value};

use crate::backend::{ActionRequest, BackendError, ScreenResponse, WorkflowApi, WorkflowClient};
use crate::core::action::{ActionPayload, ActionSender};
use crate::core::config::ResolvedConfig;
use crate::core::session::{Outcome, SessionContext, WorkflowState};
use crate::render::event::{UiEvent, poll_event};
use crate::render::interpreter::{Rendered, render_screen};
use crate::render::trigger::TriggerSet;
use crate::schema::{FlexDirection, SchemaDocument};

// ============================================================================
// Screen
// ============================================================================

/// One mounted schema: its rendered tree, armed triggers, and focus state.
/// Replacing the screen drops the old one, which cancels its pending timers.
pub struct Screen {
    doc: SchemaDocument,
    tree: Vec<Rendered>,
    _triggers: TriggerSet,
    focus_paths: Vec<Vec<usize>>,
    focus: Option<usize>,
}

impl Screen {
    /// Interpret the document and arm its triggers. Focus lands on the first
    /// interactive leaf in depth-first order, if any.
    pub fn mount(doc: SchemaDocument, sink: &ActionSender) -> Self {
        let tree = render_screen(&doc, sink);
        let triggers = TriggerSet::arm(&doc, sink);
        let mut focus_paths = Vec::new();
        collect_focus_paths(&tree, &mut Vec::new(), &mut focus_paths);
        let focus = if focus_paths.is_empty() { None } else { Some(0) };
        info!(
            "mounted screen {:?}: {} top-level node(s), {} focusable, {} trigger(s)",
            doc.screen_id,
            tree.len(),
            focus_paths.len(),
            triggers.len()
        );
        Self {
            doc,
            tree,
            _triggers: triggers,
            focus_paths,
            focus,
        }
    }

    /// A screen whose only content is an error message. Used when there is no
    /// valid schema to interpret at all.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            doc: SchemaDocument::empty(),
            tree: vec![Rendered::Error {
                id: "schema".to_string(),
                message: message.into(),
            }],
            _triggers: TriggerSet::empty(),
            focus_paths: Vec::new(),
            focus: None,
        }
    }

    pub fn screen_id(&self) -> Option<&str> {
        self.doc.screen_id.as_deref()
    }

    pub fn focus_count(&self) -> usize {
        self.focus_paths.len()
    }

    pub fn focus_next(&mut self) {
        if let Some(i) = self.focus {
            self.focus = Some((i + 1) % self.focus_paths.len());
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(i) = self.focus {
            self.focus = Some(i.checked_sub(1).unwrap_or(self.focus_paths.len() - 1));
        }
    }

    /// Route an event to the focused widget. Returns true if it was consumed.
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        let Some(i) = self.focus else {
            return false;
        };
        let path = self.focus_paths[i].clone();
        match leaf_at_mut(&mut self.tree, &path) {
            Some(widget) => widget.handle_event(event),
            None => false,
        }
    }

    /// Current values of the named widgets, keyed by node id. Ids that do not
    /// resolve to a value-bearing leaf are skipped.
    pub fn field_values(&self, ids: &[String]) -> Map<String, Value> {
        let mut fields = Map::new();
        for id in ids {
            match find_value(&self.tree, id) {
                Some(value) => {
                    fields.insert(id.clone(), value);
                }
                None => warn!("collect_fields references unknown field \"{id}\""),
            }
        }
        fields
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let focused_path = self.focus.map(|i| self.focus_paths[i].clone());
        let constraints: Vec<Constraint> = self
            .tree
            .iter()
            .map(|node| Constraint::Length(node_height(node, area.width)))
            .collect();
        let slots = Layout::vertical(constraints).split(area);
        let mut path = Vec::new();
        for (i, (node, slot)) in self.tree.iter_mut().zip(slots.iter()).enumerate() {
            path.push(i);
            draw_node(frame, node, *slot, &mut path, focused_path.as_deref());
            path.pop();
        }
    }
}

fn collect_focus_paths(nodes: &[Rendered], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (i, node) in nodes.iter().enumerate() {
        prefix.push(i);
        match node {
            Rendered::Leaf { kind, .. } if kind.is_interactive() => out.push(prefix.clone()),
            Rendered::Container { children, .. } => collect_focus_paths(children, prefix, out),
            _ => {}
        }
        prefix.pop();
    }
}

fn leaf_at_mut<'a>(
    nodes: &'a mut [Rendered],
    path: &[usize],
) -> Option<&'a mut Box<dyn widgets::LeafWidget>> {
    let (&index, rest) = path.split_first()?;
    match nodes.get_mut(index)? {
        Rendered::Leaf { widget, .. } if rest.is_empty() => Some(widget),
        Rendered::Container { children, .. } => leaf_at_mut(children, rest),
        _ => None,
    }
}

fn find_value(nodes: &[Rendered], id: &str) -> Option<Value> {
    for node in nodes {
        match node {
            Rendered::Leaf {
                id: node_id,
                widget,
                ..
            } if node_id == id => return widget.current_value(),
            Rendered::Container { children, .. } => {
                if let Some(value) = find_value(children, id) {
                    return Some(value);
                }
            }
            _ => {}
        }
    }
    None
}

// ============================================================================
// Layout
// ============================================================================

/// Rows this node will occupy at the given width, including its own padding
/// and bottom margin.
fn node_height(node: &Rendered, width: u16) -> u16 {
    match node {
        Rendered::Container {
            direction,
            style,
            children,
            ..
        } => {
            let pad = style.padding_cells();
            let inner = width.saturating_sub(pad * 2);
            let body = match direction {
                FlexDirection::Column => {
                    children.iter().map(|c| node_height(c, inner)).sum()
                }
                FlexDirection::Row | FlexDirection::Free => {
                    let per_child = inner / children.len().max(1) as u16;
                    children
                        .iter()
                        .map(|c| node_height(c, per_child))
                        .max()
                        .unwrap_or(0)
                }
            };
            body + pad * 2 + style.margin_bottom_cells()
        }
        Rendered::Leaf { style, widget, .. } => {
            let pad = style.padding_cells();
            widget.height(width.saturating_sub(pad * 2)) + pad * 2 + style.margin_bottom_cells()
        }
        Rendered::Error { .. } => 1,
    }
}

/// Shrink an area by padding on all sides and margin at the bottom.
fn content_area(area: Rect, pad: u16, margin_bottom: u16) -> Rect {
    Rect {
        x: area.x + pad.min(area.width / 2),
        y: area.y + pad.min(area.height / 2),
        width: area.width.saturating_sub(pad * 2),
        height: area.height.saturating_sub(pad * 2 + margin_bottom),
    }
}

fn draw_node(
    frame: &mut Frame,
    node: &mut Rendered,
    area: Rect,
    path: &mut Vec<usize>,
    focused: Option<&[usize]>,
) {
    match node {
        Rendered::Container {
            direction,
            style,
            children,
            ..
        } => {
            let inner = content_area(area, style.padding_cells(), style.margin_bottom_cells());
            let slots = match direction {
                FlexDirection::Column => {
                    let constraints: Vec<Constraint> = children
                        .iter()
                        .map(|c| Constraint::Length(node_height(c, inner.width)))
                        .collect();
                    Layout::vertical(constraints).split(inner)
                }
                FlexDirection::Row | FlexDirection::Free => {
                    let n = children.len().max(1) as u32;
                    Layout::horizontal(vec![Constraint::Ratio(1, n); children.len()]).split(inner)
                }
            };
            for (i, (child, slot)) in children.iter_mut().zip(slots.iter()).enumerate() {
                path.push(i);
                draw_node(frame, child, *slot, path, focused);
                path.pop();
            }
        }
        Rendered::Leaf { style, widget, .. } => {
            let inner = content_area(area, style.padding_cells(), style.margin_bottom_cells());
            let is_focused = focused == Some(path.as_slice());
            widget.draw(frame, inner, is_focused);
        }
        Rendered::Error { message, .. } => {
            frame.render_widget(
                Paragraph::new(format!("⚠ {message}")).style(Style::default().fg(Color::Red)),
                area,
            );
        }
    }
}

// ============================================================================
// Run Loop
// ============================================================================

pub struct RunOptions {
    /// Render a local schema file instead of talking to the backend.
    pub schema_file: Option<PathBuf>,
    /// Resume an existing conversation instead of starting a new one.
    pub conversation: Option<String>,
}

/// Results of background backend calls, drained on the UI thread.
enum FlowEvent {
    Screen(ScreenResponse),
    Failed(String),
}

pub fn run(config: ResolvedConfig, options: RunOptions) -> std::io::Result<()> {
    let (action_tx, action_rx) = ActionSender::channel();
    let (flow_tx, flow_rx) = mpsc::channel::<FlowEvent>();

    let mut workflow = WorkflowState::new();
    let mut status = String::new();

    // Offline mode renders a local file and dispatches nowhere.
    let offline = options.schema_file.is_some();
    let client: Option<Arc<dyn WorkflowApi>> = if offline {
        None
    } else {
        Some(Arc::new(WorkflowClient::new(
            config.backend_url.clone(),
            config.timeout_secs,
        )))
    };

    let mut session = match options.conversation {
        Some(id) if !offline => SessionContext::new(id, None),
        _ => SessionContext::local(),
    };

    let mut screen = match &options.schema_file {
        Some(path) => match load_schema_file(path) {
            Ok(doc) => Screen::mount(doc, &action_tx),
            Err(message) => Screen::error(message),
        },
        None => {
            if let Some(client) = &client {
                if session.conversation_id.starts_with("local-") {
                    spawn_start(client.clone(), flow_tx.clone());
                    status = "starting conversation...".to_string();
                } else {
                    // Resuming: the backend replays the current screen.
                    spawn_action(
                        client.clone(),
                        ActionRequest::new(
                            session.conversation_id.clone(),
                            None,
                            ActionPayload::new("resume"),
                        ),
                        flow_tx.clone(),
                    );
                    status = format!("resuming {}...", session.conversation_id);
                }
            }
            Screen::error("waiting for backend")
        }
    };

    let mut terminal = ratatui::init();
    let tick = Duration::from_millis(config.tick_rate_ms);
    let mut should_quit = false;

    loop {
        terminal.draw(|frame| {
            let [body, status_bar] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
            screen.draw(frame, body);
            frame.render_widget(
                Paragraph::new(status.as_str()).style(Style::default().add_modifier(Modifier::DIM)),
                status_bar,
            );
        })?;

        if let Some(event) = poll_event(tick) {
            match event {
                UiEvent::Quit => should_quit = true,
                UiEvent::FocusNext => screen.focus_next(),
                UiEvent::FocusPrev => screen.focus_prev(),
                UiEvent::Resize => {}
                other => {
                    screen.handle_event(&other);
                }
            }
        }
        if should_quit {
            break;
        }

        // User interactions and fired triggers, in dispatch order.
        while let Ok(mut payload) = action_rx.try_recv() {
            debug!("event loop received action \"{}\"", payload.action_id);
            if !payload.collect_fields.is_empty() {
                payload.fields = screen.field_values(&payload.collect_fields);
            }
            workflow.enter(payload.action_id.clone());
            match &client {
                Some(client) => {
                    status = format!("sending {}...", payload.action_id);
                    spawn_action(
                        client.clone(),
                        ActionRequest::new(
                            session.conversation_id.clone(),
                            screen.screen_id().map(str::to_string),
                            payload,
                        ),
                        flow_tx.clone(),
                    );
                }
                None => status = format!("offline: {} not sent", payload.action_id),
            }
        }

        // Backend replies: each one replaces the whole screen.
        while let Ok(event) = flow_rx.try_recv() {
            match event {
                FlowEvent::Screen(response) => {
                    session = SessionContext::new(
                        response.conversation_id,
                        response.screen.screen_id.clone(),
                    );
                    if let Some(next) = &response.next_action_id {
                        workflow.record_transition(Outcome::Success, next.clone());
                    }
                    screen = Screen::mount(response.screen, &action_tx);
                    status = String::new();
                }
                FlowEvent::Failed(message) => {
                    warn!("backend call failed: {message}");
                    status = message;
                }
            }
        }
    }

    ratatui::restore();
    Ok(())
}

fn load_schema_file(path: &Path) -> Result<SchemaDocument, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    SchemaDocument::from_str(&text).map_err(|e| e.to_string())
}

fn spawn_start(client: Arc<dyn WorkflowApi>, tx: mpsc::Sender<FlowEvent>) {
    tokio::spawn(async move {
        let event = match client.start().await {
            Ok(response) => FlowEvent::Screen(response),
            Err(e) => FlowEvent::Failed(flow_error(e)),
        };
        let _ = tx.send(event);
    });
}

fn spawn_action(
    client: Arc<dyn WorkflowApi>,
    request: ActionRequest,
    tx: mpsc::Sender<FlowEvent>,
) {
    tokio::spawn(async move {
        let event = match client.send_action(&request).await {
            Ok(response) => FlowEvent::Screen(response),
            Err(e) => FlowEvent::Failed(flow_error(e)),
        };
        let _ = tx.send(event);
    });
}

fn flow_error(e: BackendError) -> String {
    format!("backend error: {e}")
}

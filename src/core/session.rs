//! # Session Context & Workflow State
//!
//! The backend keys everything on a `conversation_id`. Rather than an ambient
//! global session object, a [`SessionContext`] is created per conversation and
//! passed by reference to whoever needs it.
//!
//! The schema-driven screen transitions form an implicit finite-state machine:
//! states are action ids, and each backend response tells us which action is
//! expected next. [`WorkflowState`] makes that machine explicit so the screen
//! owner can reason about "where am I" without digging through event handlers.

use std::collections::HashMap;

use log::debug;

/// Per-conversation identity, created when the backend opens a conversation
/// (or locally via [`SessionContext::local`] for offline schema rendering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub conversation_id: String,
    pub screen_id: Option<String>,
}

impl SessionContext {
    pub fn new(conversation_id: impl Into<String>, screen_id: Option<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            screen_id,
        }
    }

    /// A locally-generated session for offline rendering (no backend).
    pub fn local() -> Self {
        Self {
            conversation_id: format!("local-{}", uuid::Uuid::new_v4()),
            screen_id: None,
        }
    }
}

/// Result of attempting a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

/// Explicit client-side view of the server-driven workflow: states are action
/// ids, transitions are keyed by (current state, outcome).
#[derive(Debug, Default)]
pub struct WorkflowState {
    current: Option<String>,
    transitions: HashMap<(String, Outcome), String>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Enter a state directly (an action was dispatched, or the backend told
    /// us where we are).
    pub fn enter(&mut self, action_id: impl Into<String>) {
        let action_id = action_id.into();
        debug!("workflow state -> \"{action_id}\"");
        self.current = Some(action_id);
    }

    /// Record that `outcome` from the current state leads to `next`.
    /// No-op when no state has been entered yet.
    pub fn record_transition(&mut self, outcome: Outcome, next: impl Into<String>) {
        if let Some(current) = &self.current {
            self.transitions
                .insert((current.clone(), outcome), next.into());
        }
    }

    /// Follow a recorded transition from the current state, entering the
    /// target. Returns the new state, or `None` if no transition is known.
    pub fn advance(&mut self, outcome: Outcome) -> Option<String> {
        let current = self.current.clone()?;
        let next = self.transitions.get(&(current, outcome))?.clone();
        self.enter(next.clone());
        Some(next)
    }
}

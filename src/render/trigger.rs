//! Delayed auto-trigger timers.
//!
//! A schema can carry non-visual `action` nodes that fire their payload after
//! `trigger_delay` milliseconds without any user input (polling screens,
//! auto-advance after a success message). Each armed timer is a spawned task
//! holding a clone of the action sink; the [`TriggerSet`] keeps the abort
//! handles and cancels every outstanding timer when dropped, so replacing a
//! screen can never leak a stale action into the next one.

use std::time::Duration;

use log::{debug, warn};
use tokio::task::AbortHandle;

use crate::core::action::{ActionPayload, ActionSender};
use crate::schema::SchemaDocument;

/// Timers armed for one mounted screen. Dropping the set aborts them all.
pub struct TriggerSet {
    handles: Vec<AbortHandle>,
}

impl TriggerSet {
    /// A set with nothing armed, for screens that never had a schema.
    pub fn empty() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Arm one timer per trigger node in the document. Nodes without a
    /// parseable action or delay are skipped with a warning; they would
    /// otherwise fire nothing.
    pub fn arm(doc: &SchemaDocument, sink: &ActionSender) -> Self {
        let mut handles = Vec::new();
        for node in doc.trigger_components() {
            let Some(delay_ms) = node.properties.get("trigger_delay").and_then(|v| v.as_u64())
            else {
                warn!("trigger \"{}\" has no trigger_delay, skipping", node.id);
                continue;
            };
            let Some(action) = node
                .properties
                .get("action")
                .and_then(ActionPayload::from_property)
            else {
                warn!("trigger \"{}\" has no parseable action, skipping", node.id);
                continue;
            };
            debug!(
                "arming trigger \"{}\": {} in {delay_ms}ms",
                node.id, action.action_id
            );
            let sink = sink.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                sink.dispatch(action);
            });
            handles.push(handle.abort_handle());
        }
        Self { handles }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for TriggerSet {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        if !self.handles.is_empty() {
            debug!("cancelled {} pending trigger(s)", self.handles.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{doc, node, sink};
    use serde_json::json;
    use std::time::Duration;

    fn trigger(id: &str, delay_ms: u64, action_id: &str) -> crate::schema::ComponentNode {
        node(
            id,
            "action",
            json!({"trigger_delay": delay_ms, "action": {"action_id": action_id}}),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_fires_after_delay() {
        let (tx, rx) = sink();
        let document = doc(vec![trigger("auto", 500, "advance")]);
        let set = TriggerSet::arm(&document, &tx);
        assert_eq!(set.len(), 1);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err(), "must not fire early");

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().unwrap().action_id, "advance");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_set_cancels_pending_timers() {
        let (tx, rx) = sink();
        let document = doc(vec![trigger("auto", 1000, "stale")]);
        let set = TriggerSet::arm(&document, &tx);
        drop(set);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err(), "cancelled timer must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn test_multiple_timers_fire_independently() {
        let (tx, rx) = sink();
        let document = doc(vec![
            trigger("fast", 100, "poll"),
            trigger("slow", 1000, "timeout"),
        ]);
        let _set = TriggerSet::arm(&document, &tx);

        tokio::time::sleep(Duration::from_millis(150)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().unwrap().action_id, "poll");
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv().unwrap().action_id, "timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_visual_nodes_do_not_arm_timers() {
        let (tx, _rx) = sink();
        let document = doc(vec![
            node("t", "text", json!({"text": "hi"})),
            trigger("auto", 100, "go"),
        ]);
        let set = TriggerSet::arm(&document, &tx);
        assert_eq!(set.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_trigger_is_skipped() {
        let (tx, _rx) = sink();
        let document = doc(vec![node("broken", "action", json!({"action": "x"}))]);
        let set = TriggerSet::arm(&document, &tx);
        assert!(set.is_empty());
    }
}

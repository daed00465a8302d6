//! Progress event stream for publish batches
//!
//! The orchestrator reports per-platform progress as events on an in-process
//! broadcast bus instead of through injected callbacks, so any number of
//! consumers (CLI progress lines, a UI, tests) can observe a batch without
//! being wired into it.
//!
//! Emission is non-blocking: with no subscribers events are dropped, and a
//! lagging subscriber loses oldest events rather than stalling the batch.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::PublishSummary;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Broadcast bus distributing publish progress events.
///
/// # Example
///
/// ```
/// use libcrosscast::events::{Event, EventBus};
///
/// let bus = EventBus::new(100);
/// let mut receiver = bus.subscribe();
///
/// bus.emit(Event::BatchStarted {
///     batch_id: "b1".to_string(),
///     platforms: vec!["facebook".to_string()],
/// });
/// ```
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus whose subscribers each buffer up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers. Never blocks; send errors (no
    /// receivers) are ignored.
    pub fn emit(&self, event: Event) {
        let _ = self.sender.send(event);
    }

    /// Number of active subscribers, for diagnostics.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Per-platform progress state within a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Pending,
    Success,
    Error,
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStatus::Pending => write!(f, "pending"),
            ProgressStatus::Success => write!(f, "success"),
            ProgressStatus::Error => write!(f, "error"),
        }
    }
}

/// Events emitted while a publish batch runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A batch started; platforms are listed in publish order.
    BatchStarted {
        batch_id: String,
        platforms: Vec<String>,
    },

    /// One platform moved to a new progress state.
    PublishProgress {
        batch_id: String,
        platform: String,
        status: ProgressStatus,
    },

    /// The batch finished; every platform has a result in the summary.
    BatchCompleted {
        batch_id: String,
        summary: PublishSummary,
    },
}

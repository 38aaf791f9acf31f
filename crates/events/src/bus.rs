//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`FormBus`] is the fan-out hub for [`FieldEvent`]s. The host publishes
//! one event per discrete interaction (value change, blur, explicit dirty
//! mark); subscribers such as the validation messenger receive every
//! event independently. It is designed to be shared via `Arc<FormBus>`.

use chrono::{DateTime, Utc};
use formwork_core::types::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// FieldEvent
// ---------------------------------------------------------------------------

/// What happened to the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum FieldEventKind {
    /// The host delivered a new raw value.
    ValueChanged(Value),
    /// The field lost input focus at least once.
    Touched,
    /// The host explicitly marked the field dirty.
    MarkedDirty,
}

/// A discrete interaction with one form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEvent {
    /// The declared name of the field, e.g. `"firstName"`.
    pub field: FieldPath,

    /// The interaction that occurred.
    pub kind: FieldEventKind,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl FieldEvent {
    pub fn value_changed(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FieldEventKind::ValueChanged(value))
    }

    pub fn touched(field: impl Into<String>) -> Self {
        Self::new(field, FieldEventKind::Touched)
    }

    pub fn marked_dirty(field: impl Into<String>) -> Self {
        Self::new(field, FieldEventKind::MarkedDirty)
    }

    fn new(field: impl Into<String>, kind: FieldEventKind) -> Self {
        Self {
            field: field.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// FormBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for field events.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`FieldEvent`].
pub struct FormBus {
    sender: broadcast::Sender<FieldEvent>,
}

impl FormBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// field state is updated synchronously by the form, not by
    /// subscribers, so nothing is lost.
    pub fn publish(&self, event: FieldEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<FieldEvent> {
        self.sender.subscribe()
    }
}

impl Default for FormBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`TrackerEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracker_core::{OverallStatus, RiskLevel};

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A gauge's reading was replaced.
pub const EVENT_READING_UPDATED: &str = "reading.updated";
/// An update was refused (unknown gauge or non-finite value).
pub const EVENT_READING_REJECTED: &str = "reading.rejected";
/// A gauge's reading was removed; it is now unclassified.
pub const EVENT_READING_CLEARED: &str = "reading.cleared";
/// The selection pointer moved.
pub const EVENT_SELECTION_CHANGED: &str = "selection.changed";
/// The overall verdict changed.
pub const EVENT_STATUS_CHANGED: &str = "status.changed";
/// Full session state, sent once to each newly attached client.
pub const EVENT_SESSION_SNAPSHOT: &str = "session.snapshot";

// ---------------------------------------------------------------------------
// TrackerEvent
// ---------------------------------------------------------------------------

/// Something that happened to the tracker session.
///
/// Constructed via [`TrackerEvent::new`] or one of the typed constructors
/// and enriched with [`with_gauge`](TrackerEvent::with_gauge) and
/// [`with_payload`](TrackerEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerEvent {
    /// Dot-separated event name, e.g. `"reading.updated"`.
    pub event_type: String,

    /// Gauge the event concerns, if any.
    pub gauge_id: Option<String>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl TrackerEvent {
    /// Create a new event with only the required `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            gauge_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the gauge this event concerns.
    pub fn with_gauge(mut self, gauge_id: impl Into<String>) -> Self {
        self.gauge_id = Some(gauge_id.into());
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn reading_updated(gauge_id: &str, value: f64, level: RiskLevel) -> Self {
        Self::new(EVENT_READING_UPDATED)
            .with_gauge(gauge_id)
            .with_payload(serde_json::json!({ "value": value, "level": level }))
    }

    pub fn reading_rejected(gauge_id: &str, reason: &str) -> Self {
        Self::new(EVENT_READING_REJECTED)
            .with_gauge(gauge_id)
            .with_payload(serde_json::json!({ "reason": reason }))
    }

    pub fn reading_cleared(gauge_id: &str) -> Self {
        Self::new(EVENT_READING_CLEARED).with_gauge(gauge_id)
    }

    pub fn selection_changed(gauge_id: Option<&str>) -> Self {
        let event = Self::new(EVENT_SELECTION_CHANGED);
        match gauge_id {
            Some(id) => event.with_gauge(id),
            None => event,
        }
    }

    pub fn status_changed(from: OverallStatus, to: OverallStatus) -> Self {
        Self::new(EVENT_STATUS_CHANGED).with_payload(serde_json::json!({
            "from": from,
            "to": to,
            "escalated": to > from,
        }))
    }

    /// Wrap an already serialized session snapshot.
    pub fn session_snapshot(snapshot: serde_json::Value) -> Self {
        Self::new(EVENT_SESSION_SNAPSHOT).with_payload(snapshot)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`TrackerEvent`].
///
/// # Usage
///
/// ```rust
/// use tracker_events::bus::{EventBus, TrackerEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(TrackerEvent::reading_cleared("capex-revenue"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<TrackerEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: TrackerEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

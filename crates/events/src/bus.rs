//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Handlers publish a [`TrackerEvent`] only after their write has committed.
//! Consumers (the approval notifier) subscribe and react asynchronously, so a
//! slow or failing consumer never delays or fails the originating request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracker_core::language::Language;
use tracker_core::types::DbId;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// An unprivileged editor changed an Action's progress text.
pub const ACTION_UPDATE_SUBMITTED: &str = "action.update_submitted";

// ---------------------------------------------------------------------------
// TrackerEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred in the tracker.
///
/// Built with [`TrackerEvent::new`] plus [`with_source`](Self::with_source),
/// [`with_actor`](Self::with_actor) and [`with_payload`](Self::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerEvent {
    /// Dot-separated event name, e.g. `"action.update_submitted"`.
    pub event_type: String,
    /// Source entity kind, e.g. `"action"`.
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    /// The user whose request triggered the event.
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl TrackerEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Build an [`ACTION_UPDATE_SUBMITTED`] event.
    pub fn update_submitted(editor_id: DbId, details: &UpdateSubmitted) -> Self {
        Self::new(ACTION_UPDATE_SUBMITTED)
            .with_source("action", details.action_id)
            .with_actor(editor_id)
            .with_payload(serde_json::to_value(details).unwrap_or_default())
    }

    /// Decode the payload of an [`ACTION_UPDATE_SUBMITTED`] event.
    ///
    /// Returns `None` for other event types or a malformed payload.
    pub fn as_update_submitted(&self) -> Option<UpdateSubmitted> {
        if self.event_type != ACTION_UPDATE_SUBMITTED {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Payload of [`ACTION_UPDATE_SUBMITTED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSubmitted {
    pub action_id: DbId,
    pub action_title: String,
    pub editor_username: String,
    /// Languages whose progress text changed.
    pub languages: Vec<Language>,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus, shared as `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<TrackerEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest unconsumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody
    /// is listening.
    pub fn publish(&self, event: TrackerEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.sender.subscribe()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> UpdateSubmitted {
        UpdateSubmitted {
            action_id: 12,
            action_title: "Launch portal".into(),
            editor_username: "staff".into(),
            languages: vec![Language::English, Language::Irish],
        }
    }

    #[tokio::test]
    async fn update_submitted_round_trips_through_bus() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(TrackerEvent::update_submitted(7, &details()));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, ACTION_UPDATE_SUBMITTED);
        assert_eq!(received.source_entity_type.as_deref(), Some("action"));
        assert_eq!(received.source_entity_id, Some(12));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["languages"], serde_json::json!(["en", "ga"]));
        assert_eq!(received.as_update_submitted(), Some(details()));
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(TrackerEvent::new("theme.created"));

        assert_eq!(rx1.recv().await.unwrap().event_type, "theme.created");
        assert_eq!(rx2.recv().await.unwrap().event_type, "theme.created");
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        EventBus::default().publish(TrackerEvent::new("orphan"));
    }

    #[test]
    fn other_event_types_do_not_decode_as_update() {
        let event = TrackerEvent::new("theme.created").with_payload(
            serde_json::to_value(details()).unwrap(),
        );
        assert!(event.as_update_submitted().is_none());
    }
}

//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the collector that
//! publishes and whatever activity-log subscribers the host attaches.

use abbreviations_core::domain_event::DomainEvent;
use abbreviations_core::types::DbId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ActivityEvent
// ---------------------------------------------------------------------------

/// A domain event as seen by activity-log consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// `"<resource_key>.<verb>"`, e.g. `"abbreviations.restored"`.
    pub event_type: String,

    pub resource_key: String,

    /// Id of the affected resource, as text.
    pub resource_id: String,

    pub resource_title: Option<String>,

    /// User the change is attributed to, if known.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data (for restores: the trash snapshot).
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn from_domain_event(event: &dyn DomainEvent) -> Self {
        Self {
            event_type: format!("{}.{}", event.resource_key(), event.event_type()),
            resource_key: event.resource_key().to_string(),
            resource_id: event.resource_id(),
            resource_title: event.resource_title(),
            actor_user_id: event.actor_id(),
            payload: event.event_payload(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use abbreviations_events::bus::EventBus;
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
/// assert_eq!(bus.subscriber_count(), 1);
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ActivityEvent>,
}

impl EventBus {
    /// Slow receivers observe `RecvError::Lagged` once `capacity` events
    /// are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody
    /// listens.
    pub fn publish(&self, event: ActivityEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
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

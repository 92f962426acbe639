//! Domain events emitted by the abbreviation module.

use crate::abbreviation::{Abbreviation, RESOURCE_KEY};
use crate::capabilities::UserBlame;
use crate::types::DbId;

/// An event handed to a [`DomainEventCollector`](crate::ports::DomainEventCollector).
pub trait DomainEvent: std::fmt::Debug + Send + Sync {
    /// Short verb such as `"restored"`.
    fn event_type(&self) -> &'static str;

    fn resource_key(&self) -> &'static str;

    fn resource_id(&self) -> String;

    fn resource_title(&self) -> Option<String>;

    /// Event-specific data for activity log consumers.
    fn event_payload(&self) -> serde_json::Value;

    /// User the event is attributed to, when known.
    fn actor_id(&self) -> Option<DbId> {
        None
    }
}

/// Emitted after a trashed abbreviation was rebuilt from its snapshot.
///
/// Carries the reconstructed entity and the raw snapshot it came from.
#[derive(Debug, Clone)]
pub struct AbbreviationRestoredEvent {
    abbreviation: Abbreviation,
    payload: serde_json::Value,
}

impl AbbreviationRestoredEvent {
    pub fn new(abbreviation: Abbreviation, payload: serde_json::Value) -> Self {
        Self {
            abbreviation,
            payload,
        }
    }
}

impl DomainEvent for AbbreviationRestoredEvent {
    fn event_type(&self) -> &'static str {
        "restored"
    }

    fn resource_key(&self) -> &'static str {
        RESOURCE_KEY
    }

    fn resource_id(&self) -> String {
        self.abbreviation
            .id
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    fn resource_title(&self) -> Option<String> {
        Some(self.abbreviation.title.clone())
    }

    fn event_payload(&self) -> serde_json::Value {
        self.payload.clone()
    }

    fn actor_id(&self) -> Option<DbId> {
        self.abbreviation.changer_id()
    }
}

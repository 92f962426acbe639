//! Buffering domain event collector.

use std::sync::{Arc, Mutex};

use abbreviations_core::domain_event::DomainEvent;
use abbreviations_core::ports::DomainEventCollector;

use crate::bus::{ActivityEvent, EventBus};

/// Collects domain events during an operation and publishes them on the
/// [`EventBus`] when [`dispatch`](DomainEventCollector::dispatch) is called.
pub struct BufferedEventCollector {
    bus: Arc<EventBus>,
    pending: Mutex<Vec<Box<dyn DomainEvent>>>,
}

impl BufferedEventCollector {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Box<dyn DomainEvent>>> {
        // A panic while holding the lock leaves the buffer usable.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DomainEventCollector for BufferedEventCollector {
    fn collect(&self, event: Box<dyn DomainEvent>) {
        tracing::debug!(
            resource_key = event.resource_key(),
            event_type = event.event_type(),
            "Collected domain event"
        );
        self.lock().push(event);
    }

    fn dispatch(&self) {
        let events: Vec<_> = self.lock().drain(..).collect();
        for event in events {
            self.bus.publish(ActivityEvent::from_domain_event(event.as_ref()));
        }
    }

    fn clear(&self) {
        let dropped = {
            let mut pending = self.lock();
            let n = pending.len();
            pending.clear();
            n
        };
        if dropped > 0 {
            tracing::debug!(dropped, "Discarded collected domain events");
        }
    }
}

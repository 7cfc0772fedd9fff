//! In-memory event bus for tests and local development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Collects published events in memory.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events published so far.
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Snapshot of published events.
    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().unwrap().clone()
    }

    /// Event type strings in publication order.
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.events.lock().unwrap().extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bus_collects_events_in_order() {
        let bus = InMemoryEventBus::new();
        bus.publish(EventEnvelope::test_fixture()).await.unwrap();
        bus.publish_all(vec![EventEnvelope::test_fixture()])
            .await
            .unwrap();

        assert_eq!(bus.event_count(), 2);
        assert_eq!(bus.event_types().len(), 2);
    }
}

//! In-memory connection gate for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId, ParticipantId};
use crate::ports::ConnectionGate;

/// In-memory connection gate for testing.
///
/// Connections are stored as they were inserted; lookups check both
/// orientations so the gate stays symmetric.
#[derive(Debug, Default)]
pub struct InMemoryConnectionGate {
    connections: RwLock<HashSet<(EventId, ParticipantId, ParticipantId)>>,
}

impl InMemoryConnectionGate {
    /// Creates a new empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connection between two participants at an event.
    pub fn with_connection(self, event_id: EventId, a: ParticipantId, b: ParticipantId) -> Self {
        self.connections.write().unwrap().insert((event_id, a, b));
        self
    }

    /// Records a connection at runtime.
    pub fn connect(&self, event_id: EventId, a: ParticipantId, b: ParticipantId) {
        self.connections.write().unwrap().insert((event_id, a, b));
    }
}

#[async_trait]
impl ConnectionGate for InMemoryConnectionGate {
    async fn has_connection(
        &self,
        event_id: &EventId,
        a: &ParticipantId,
        b: &ParticipantId,
    ) -> Result<bool, DomainError> {
        let connections = self.connections.read().unwrap();
        Ok(connections.contains(&(*event_id, *a, *b))
            || connections.contains(&(*event_id, *b, *a)))
    }
}

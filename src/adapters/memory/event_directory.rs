//! In-memory event directory for testing.
//!
//! Holds event windows and registration rosters configured up front,
//! standing in for the event service the scheduling side asks about.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::domain::event::EventWindow;
use crate::domain::foundation::{DomainError, EventId, ParticipantId, ParticipantRef};
use crate::ports::EventDirectory;

/// In-memory event directory for testing.
///
/// Unknown events have no window; unregistered participants simply
/// come back as not registered.
#[derive(Debug, Default)]
pub struct InMemoryEventDirectory {
    /// Scheduling windows keyed by event
    events: RwLock<HashMap<EventId, EventWindow>>,
    /// Registered (event, participant) pairs
    registrations: RwLock<HashSet<(EventId, ParticipantId)>>,
}

impl InMemoryEventDirectory {
    /// Creates a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an event with its scheduling window.
    pub fn with_event(self, event_id: EventId, window: EventWindow) -> Self {
        self.events.write().unwrap().insert(event_id, window);
        self
    }

    /// Registers a participant for an event.
    pub fn with_registration(self, event_id: EventId, participant: &ParticipantRef) -> Self {
        self.registrations
            .write()
            .unwrap()
            .insert((event_id, participant.id));
        self
    }

    /// Registers a participant at runtime.
    pub fn register(&self, event_id: EventId, participant: &ParticipantRef) {
        self.registrations
            .write()
            .unwrap()
            .insert((event_id, participant.id));
    }
}

#[async_trait]
impl EventDirectory for InMemoryEventDirectory {
    async fn event_window(&self, event_id: &EventId) -> Result<Option<EventWindow>, DomainError> {
        Ok(self.events.read().unwrap().get(event_id).copied())
    }

    async fn is_participant_registered(
        &self,
        event_id: &EventId,
        participant: &ParticipantRef,
    ) -> Result<bool, DomainError> {
        Ok(self
            .registrations
            .read()
            .unwrap()
            .contains(&(*event_id, participant.id)))
    }

    async fn active_event_ids(&self, as_of: NaiveDate) -> Result<Vec<EventId>, DomainError> {
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|(_, window)| window.to_date() >= as_of)
            .map(|(id, _)| *id)
            .collect())
    }
}

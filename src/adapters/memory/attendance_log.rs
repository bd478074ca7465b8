//! In-memory attendance log for testing.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventId, ParticipantId};
use crate::ports::AttendanceLog;

/// In-memory attendance log for testing.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceLog {
    checkins: RwLock<HashMap<(EventId, ParticipantId), BTreeSet<NaiveDate>>>,
}

impl InMemoryAttendanceLog {
    /// Creates a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check-in day for a participant at an event.
    pub fn with_checkin(self, event_id: EventId, participant_id: ParticipantId, date: NaiveDate) -> Self {
        self.checkins
            .write()
            .unwrap()
            .entry((event_id, participant_id))
            .or_default()
            .insert(date);
        self
    }

    /// Records a check-in at runtime.
    pub fn record_checkin(&self, event_id: EventId, participant_id: ParticipantId, date: NaiveDate) {
        self.checkins
            .write()
            .unwrap()
            .entry((event_id, participant_id))
            .or_default()
            .insert(date);
    }
}

#[async_trait]
impl AttendanceLog for InMemoryAttendanceLog {
    async fn attended_dates(
        &self,
        event_id: &EventId,
        participant_id: &ParticipantId,
    ) -> Result<BTreeSet<NaiveDate>, DomainError> {
        Ok(self
            .checkins
            .read()
            .unwrap()
            .get(&(*event_id, *participant_id))
            .cloned()
            .unwrap_or_default())
    }
}

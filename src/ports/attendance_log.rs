//! Attendance log port.
//!
//! Supplies the calendar days a participant has checked in for an
//! event. Used to filter slot listings down to days the sheet owner
//! was actually present.

use crate::domain::foundation::{DomainError, EventId, ParticipantId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Read-only port onto the attendance collaborator.
#[async_trait]
pub trait AttendanceLog: Send + Sync {
    /// The distinct calendar days the participant checked in for the
    /// event. Empty if they never attended.
    async fn attended_dates(
        &self,
        event_id: &EventId,
        participant_id: &ParticipantId,
    ) -> Result<BTreeSet<NaiveDate>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn attendance_log_is_object_safe() {
        fn _accepts_dyn(_log: &dyn AttendanceLog) {}
    }
}

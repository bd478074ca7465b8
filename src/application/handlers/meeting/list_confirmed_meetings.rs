//! ListConfirmedMeetingsHandler - Query handler for a participant's agenda.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{EventId, ParticipantId};
use crate::domain::meeting::{MeetingError, MeetingRequest};
use crate::ports::MeetingReader;

/// Query for the accepted meetings a participant is part of.
#[derive(Debug, Clone)]
pub struct ListConfirmedMeetingsQuery {
    pub participant_id: ParticipantId,
    /// When set, restricts the agenda to one event.
    pub event_id: Option<EventId>,
}

/// Accepted meetings on one calendar day, ordered by slot start.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub meetings: Vec<MeetingRequest>,
}

/// Result of an agenda query.
#[derive(Debug, Clone)]
pub struct ListConfirmedMeetingsResult {
    pub days: Vec<DaySchedule>,
}

/// Handler for agenda queries.
pub struct ListConfirmedMeetingsHandler {
    reader: Arc<dyn MeetingReader>,
}

impl ListConfirmedMeetingsHandler {
    pub fn new(reader: Arc<dyn MeetingReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListConfirmedMeetingsQuery,
    ) -> Result<ListConfirmedMeetingsResult, MeetingError> {
        // 1. Fetch accepted meetings, ordered by slot start
        let meetings = self
            .reader
            .confirmed_meetings(&query.participant_id, query.event_id.as_ref())
            .await?;

        // 2. Group into per-day schedules; the ordering makes days contiguous
        let mut days: Vec<DaySchedule> = Vec::new();
        for meeting in meetings {
            let date = meeting.meeting_date();
            match days.last_mut() {
                Some(day) if day.date == date => day.meetings.push(meeting),
                _ => days.push(DaySchedule {
                    date,
                    meetings: vec![meeting],
                }),
            }
        }

        Ok(ListConfirmedMeetingsResult { days })
    }
}

//! ListAvailableSlotsHandler - Query handler for viewing a sheet's open slots.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId, ParticipantRef, SheetId};
use crate::domain::scheduling::{ScheduleError, Slot};
use crate::ports::{AttendanceLog, ConnectionGate, SlotSheetRepository};

/// Query for a participant's slots at an event.
#[derive(Debug, Clone)]
pub struct ListAvailableSlotsQuery {
    pub event_id: EventId,
    pub owner_id: ParticipantId,
    pub caller: ParticipantId,
    /// Restrict to calendar days the owner has an attendance check-in for.
    pub attended_days_only: bool,
}

/// Result of a slot listing.
#[derive(Debug, Clone)]
pub struct ListAvailableSlotsResult {
    pub sheet_id: SheetId,
    pub owner: ParticipantRef,
    pub show_slots: bool,
    pub slots: Vec<Slot>,
}

/// Handler for slot listings.
pub struct ListAvailableSlotsHandler {
    sheets: Arc<dyn SlotSheetRepository>,
    connections: Arc<dyn ConnectionGate>,
    attendance: Arc<dyn AttendanceLog>,
}

impl ListAvailableSlotsHandler {
    pub fn new(
        sheets: Arc<dyn SlotSheetRepository>,
        connections: Arc<dyn ConnectionGate>,
        attendance: Arc<dyn AttendanceLog>,
    ) -> Self {
        Self {
            sheets,
            connections,
            attendance,
        }
    }

    pub async fn handle(
        &self,
        query: ListAvailableSlotsQuery,
    ) -> Result<ListAvailableSlotsResult, ScheduleError> {
        // 1. Load the owner's sheet
        let sheet = self
            .sheets
            .find_by_owner(&query.event_id, &query.owner_id)
            .await?
            .ok_or_else(ScheduleError::no_sheet_for_owner)?;

        // 2. Counterparts need the sheet shared and a connection; a hidden
        //    sheet stays hidden even from connected participants
        let is_owner = sheet.is_owner(&query.caller);
        if !is_owner {
            if !sheet.show_slots() {
                return Err(ScheduleError::forbidden(
                    "Sheet owner has not shared their slots",
                ));
            }
            let connected = self
                .connections
                .has_connection(&query.event_id, &query.caller, &query.owner_id)
                .await?;
            if !connected {
                return Err(ScheduleError::forbidden(
                    "No connection with the sheet owner",
                ));
            }
        }

        // 3. Owners see every slot with its state; counterparts only open ones
        let mut slots = if is_owner {
            sheet.slots().to_vec()
        } else {
            sheet.available_slots()
        };

        // 4. Optional attendance filter
        if query.attended_days_only {
            let days = self
                .attendance
                .attended_dates(&query.event_id, &query.owner_id)
                .await?;
            slots.retain(|slot| days.contains(&slot.date()));
        }

        Ok(ListAvailableSlotsResult {
            sheet_id: *sheet.id(),
            owner: *sheet.owner(),
            show_slots: sheet.show_slots(),
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryAttendanceLog, InMemoryConnectionGate, InMemorySlotSheetRepository,
    };
    use crate::domain::event::EventWindow;
    use crate::domain::foundation::MeetingRequestId;
    use crate::domain::scheduling::SlotSheet;
    use chrono::{NaiveDate, NaiveTime};

    fn test_window() -> EventWindow {
        EventWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    struct Fixture {
        sheets: Arc<InMemorySlotSheetRepository>,
        connections: Arc<InMemoryConnectionGate>,
        attendance: Arc<InMemoryAttendanceLog>,
        event_id: EventId,
        owner: ParticipantRef,
        sheet: SlotSheet,
    }

    async fn fixture(show_slots: bool) -> Fixture {
        let event_id = EventId::new();
        let owner = ParticipantRef::exhibitor(ParticipantId::new());
        let sheet = SlotSheet::new(SheetId::new(), owner, event_id, &test_window());
        let sheets = Arc::new(InMemorySlotSheetRepository::new());
        sheets.save(&sheet).await.unwrap();
        if show_slots {
            sheets.set_visibility(sheet.id(), true).await.unwrap();
        }
        Fixture {
            sheets,
            connections: Arc::new(InMemoryConnectionGate::new()),
            attendance: Arc::new(InMemoryAttendanceLog::new()),
            event_id,
            owner,
            sheet,
        }
    }

    fn handler(fixture: &Fixture) -> ListAvailableSlotsHandler {
        ListAvailableSlotsHandler::new(
            fixture.sheets.clone(),
            fixture.connections.clone(),
            fixture.attendance.clone(),
        )
    }

    #[tokio::test]
    async fn owner_sees_every_slot_even_while_hidden() {
        let fx = fixture(false).await;
        // One slot is claimed; the owner should still see it listed
        let span = fx.sheet.slots()[0].span();
        fx.sheets
            .claim_slot(fx.sheet.id(), span, MeetingRequestId::new())
            .await
            .unwrap();

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: fx.owner.id,
                caller: fx.owner.id,
                attended_days_only: false,
            })
            .await
            .unwrap();

        assert_eq!(result.slots.len(), 4);
        assert_eq!(result.slots.iter().filter(|s| !s.is_available()).count(), 1);
    }

    #[tokio::test]
    async fn connected_counterpart_sees_only_available_slots() {
        let fx = fixture(true).await;
        let caller = ParticipantId::new();
        fx.connections.connect(fx.event_id, caller, fx.owner.id);
        let span = fx.sheet.slots()[0].span();
        fx.sheets
            .claim_slot(fx.sheet.id(), span, MeetingRequestId::new())
            .await
            .unwrap();

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: fx.owner.id,
                caller,
                attended_days_only: false,
            })
            .await
            .unwrap();

        assert_eq!(result.slots.len(), 3);
        assert!(result.slots.iter().all(|s| s.is_available()));
    }

    #[tokio::test]
    async fn hidden_sheet_is_forbidden_even_with_a_connection() {
        let fx = fixture(false).await;
        let caller = ParticipantId::new();
        fx.connections.connect(fx.event_id, caller, fx.owner.id);

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: fx.owner.id,
                caller,
                attended_days_only: false,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::Forbidden(_))));
    }

    #[tokio::test]
    async fn unconnected_counterpart_is_forbidden() {
        let fx = fixture(true).await;

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: fx.owner.id,
                caller: ParticipantId::new(),
                attended_days_only: false,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::Forbidden(_))));
    }

    #[tokio::test]
    async fn attendance_filter_keeps_only_attended_days() {
        let fx = fixture(true).await;
        let caller = ParticipantId::new();
        fx.connections.connect(fx.event_id, caller, fx.owner.id);
        // Owner checked in on the first day only
        fx.attendance.record_checkin(
            fx.event_id,
            fx.owner.id,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        );

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: fx.owner.id,
                caller,
                attended_days_only: true,
            })
            .await
            .unwrap();

        assert_eq!(result.slots.len(), 2);
        assert!(result
            .slots
            .iter()
            .all(|s| s.date() == NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
    }

    #[tokio::test]
    async fn missing_sheet_is_reported() {
        let fx = fixture(true).await;

        let result = handler(&fx)
            .handle(ListAvailableSlotsQuery {
                event_id: fx.event_id,
                owner_id: ParticipantId::new(),
                caller: fx.owner.id,
                attended_days_only: false,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::SheetNotFound(_))));
    }
}

//! ReconcileSheetsHandler - Repair sweep for slots that disagree with their requests.
//!
//! A crash between a guarded slot update and its companion request write
//! leaves the pair out of step. The sweep walks every sheet of an event,
//! checks each held slot against its request, and applies the guarded
//! transition the interrupted operation never got to. Booked slots have
//! no transition out, so anomalies there are reported, not repaired.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::foundation::{
    EventId, MeetingRequestId, RequestStatus, SheetId, SlotState, Timestamp,
};
use crate::domain::scheduling::ScheduleError;
use crate::ports::{MeetingRequestRepository, SlotSheetRepository};

/// Command to reconcile all sheets of an event.
#[derive(Debug, Clone)]
pub struct ReconcileSheetsCommand {
    pub event_id: EventId,
}

/// Tally of a reconciliation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSheetsResult {
    pub sheets_scanned: usize,
    pub slots_released: usize,
    pub slots_booked: usize,
    pub inconsistencies_reported: usize,
}

/// Handler for the reconciliation sweep.
pub struct ReconcileSheetsHandler {
    sheets: Arc<dyn SlotSheetRepository>,
    requests: Arc<dyn MeetingRequestRepository>,
}

impl ReconcileSheetsHandler {
    pub fn new(
        sheets: Arc<dyn SlotSheetRepository>,
        requests: Arc<dyn MeetingRequestRepository>,
    ) -> Self {
        Self { sheets, requests }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileSheetsCommand,
    ) -> Result<ReconcileSheetsResult, ScheduleError> {
        let sheets = self.sheets.find_by_event(&cmd.event_id).await?;
        let mut report = ReconcileSheetsResult::default();

        for sheet in &sheets {
            report.sheets_scanned += 1;
            for slot in sheet.slots() {
                match slot.state() {
                    SlotState::Available => {}
                    SlotState::Requested(request_id) => {
                        let status = self
                            .requests
                            .find_by_id(&request_id)
                            .await?
                            .map(|r| r.status());
                        match status {
                            // The normal pending shape; nothing to do
                            Some(RequestStatus::Pending) => {}
                            // Resolution landed but the slot never moved
                            Some(RequestStatus::Accepted) => {
                                if self.finish_booking(sheet.id(), slot.start(), request_id).await {
                                    report.slots_booked += 1;
                                }
                            }
                            Some(_) | None => {
                                if self.free_slot(sheet.id(), slot.start(), request_id).await {
                                    report.slots_released += 1;
                                }
                            }
                        }
                    }
                    SlotState::Booked(request_id) => {
                        let status = self
                            .requests
                            .find_by_id(&request_id)
                            .await?
                            .map(|r| r.status());
                        if status != Some(RequestStatus::Accepted) {
                            // No guarded transition leads out of booked
                            error!(
                                sheet_id = %sheet.id(),
                                slot_start = %slot.start(),
                                meeting_request_id = %request_id,
                                "Booked slot does not match an accepted request"
                            );
                            report.inconsistencies_reported += 1;
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Applies the booking an accepted request never finished. Returns
    /// whether the repair landed; a lost race just means the state moved
    /// on and the next sweep will see the new shape.
    async fn finish_booking(
        &self,
        sheet_id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> bool {
        match self.sheets.book_slot(sheet_id, slot_start, request_id).await {
            Ok(()) => {
                warn!(
                    sheet_id = %sheet_id,
                    slot_start = %slot_start,
                    meeting_request_id = %request_id,
                    "Repaired slot left behind by an accepted request"
                );
                true
            }
            Err(err) => {
                warn!(
                    sheet_id = %sheet_id,
                    slot_start = %slot_start,
                    error = %err,
                    "Slot repair skipped"
                );
                false
            }
        }
    }

    /// Releases a slot held by a missing or already terminal request.
    async fn free_slot(
        &self,
        sheet_id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> bool {
        match self
            .sheets
            .release_slot(sheet_id, slot_start, request_id)
            .await
        {
            Ok(()) => {
                warn!(
                    sheet_id = %sheet_id,
                    slot_start = %slot_start,
                    meeting_request_id = %request_id,
                    "Released slot held by a missing or resolved request"
                );
                true
            }
            Err(err) => {
                warn!(
                    sheet_id = %sheet_id,
                    slot_start = %slot_start,
                    error = %err,
                    "Slot repair skipped"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMeetingRequestRepository, InMemorySlotSheetRepository};
    use crate::domain::event::EventWindow;
    use crate::domain::foundation::{ParticipantId, ParticipantRef};
    use crate::domain::meeting::MeetingRequest;
    use crate::domain::scheduling::{Slot, SlotSheet, SlotSpan};
    use chrono::{NaiveDate, NaiveTime};

    fn test_window() -> EventWindow {
        EventWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    struct Fixture {
        sheets: Arc<InMemorySlotSheetRepository>,
        requests: Arc<InMemoryMeetingRequestRepository>,
        handler: ReconcileSheetsHandler,
        event_id: EventId,
        sheet: SlotSheet,
        span: SlotSpan,
    }

    async fn fixture() -> Fixture {
        let event_id = EventId::new();
        let owner = ParticipantRef::exhibitor(ParticipantId::new());
        let sheet = SlotSheet::new(SheetId::new(), owner, event_id, &test_window());
        let span = sheet.slots()[0].span();
        let sheets = Arc::new(InMemorySlotSheetRepository::new());
        sheets.save(&sheet).await.unwrap();
        let requests = Arc::new(InMemoryMeetingRequestRepository::new());
        let handler = ReconcileSheetsHandler::new(sheets.clone(), requests.clone());
        Fixture {
            sheets,
            requests,
            handler,
            event_id,
            sheet,
            span,
        }
    }

    fn pending_request(fx: &Fixture) -> MeetingRequest {
        MeetingRequest::new(
            MeetingRequestId::new(),
            fx.event_id,
            ParticipantRef::visitor(ParticipantId::new()),
            *fx.sheet.owner(),
            *fx.sheet.id(),
            fx.span,
        )
        .unwrap()
    }

    async fn slot_state(fx: &Fixture) -> SlotState {
        fx.sheets
            .find_by_id(fx.sheet.id())
            .await
            .unwrap()
            .unwrap()
            .slot_at(fx.span.start())
            .unwrap()
            .state()
    }

    #[tokio::test]
    async fn releases_slot_whose_request_is_missing() {
        let fx = fixture().await;
        // A claim that never got its request written
        fx.sheets
            .claim_slot(fx.sheet.id(), fx.span, MeetingRequestId::new())
            .await
            .unwrap();

        let report = fx
            .handler
            .handle(ReconcileSheetsCommand {
                event_id: fx.event_id,
            })
            .await
            .unwrap();

        assert_eq!(report.slots_released, 1);
        assert_eq!(report.inconsistencies_reported, 0);
        assert_eq!(slot_state(&fx).await, SlotState::Available);
    }

    #[tokio::test]
    async fn releases_slot_held_by_a_rejected_request() {
        let fx = fixture().await;
        let request = pending_request(&fx);
        fx.sheets
            .claim_slot(fx.sheet.id(), fx.span, *request.id())
            .await
            .unwrap();
        fx.requests.create(&request).await.unwrap();
        // Resolution landed but the release never ran
        fx.requests
            .resolve(request.id(), RequestStatus::Rejected, Timestamp::now())
            .await
            .unwrap();

        let report = fx
            .handler
            .handle(ReconcileSheetsCommand {
                event_id: fx.event_id,
            })
            .await
            .unwrap();

        assert_eq!(report.slots_released, 1);
        assert_eq!(slot_state(&fx).await, SlotState::Available);
    }

    #[tokio::test]
    async fn finishes_booking_for_an_accepted_request() {
        let fx = fixture().await;
        let request = pending_request(&fx);
        fx.sheets
            .claim_slot(fx.sheet.id(), fx.span, *request.id())
            .await
            .unwrap();
        fx.requests.create(&request).await.unwrap();
        fx.requests
            .resolve(request.id(), RequestStatus::Accepted, Timestamp::now())
            .await
            .unwrap();

        let report = fx
            .handler
            .handle(ReconcileSheetsCommand {
                event_id: fx.event_id,
            })
            .await
            .unwrap();

        assert_eq!(report.slots_booked, 1);
        assert_eq!(slot_state(&fx).await, SlotState::Booked(*request.id()));
    }

    #[tokio::test]
    async fn leaves_consistent_sheets_untouched() {
        let fx = fixture().await;
        let request = pending_request(&fx);
        fx.sheets
            .claim_slot(fx.sheet.id(), fx.span, *request.id())
            .await
            .unwrap();
        fx.requests.create(&request).await.unwrap();

        let report = fx
            .handler
            .handle(ReconcileSheetsCommand {
                event_id: fx.event_id,
            })
            .await
            .unwrap();

        assert_eq!(report.sheets_scanned, 1);
        assert_eq!(report.slots_released, 0);
        assert_eq!(report.slots_booked, 0);
        assert_eq!(report.inconsistencies_reported, 0);
        assert_eq!(slot_state(&fx).await, SlotState::Requested(*request.id()));
    }

    #[tokio::test]
    async fn reports_booked_slot_without_an_accepted_request() {
        let event_id = EventId::new();
        let owner = ParticipantRef::exhibitor(ParticipantId::new());
        let orphaned = MeetingRequestId::new();
        let start = Timestamp::from_naive_utc(
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        let slots = vec![Slot::reconstitute(
            start,
            start.plus_minutes(30),
            SlotState::Booked(orphaned),
        )];
        let sheet = SlotSheet::reconstitute(
            SheetId::new(),
            owner,
            event_id,
            false,
            slots,
            Timestamp::now(),
            Timestamp::now(),
        );
        let sheets = Arc::new(InMemorySlotSheetRepository::new());
        sheets.save(&sheet).await.unwrap();
        let requests = Arc::new(InMemoryMeetingRequestRepository::new());
        let handler = ReconcileSheetsHandler::new(sheets.clone(), requests);

        let report = handler
            .handle(ReconcileSheetsCommand { event_id })
            .await
            .unwrap();

        assert_eq!(report.inconsistencies_reported, 1);
        assert_eq!(report.slots_released, 0);
        // Booked slots are never mutated by the sweep
        let state = sheets
            .find_by_id(sheet.id())
            .await
            .unwrap()
            .unwrap()
            .slot_at(start)
            .unwrap()
            .state();
        assert_eq!(state, SlotState::Booked(orphaned));
    }

    #[tokio::test]
    async fn scans_only_the_requested_event() {
        let fx = fixture().await;
        // Anomaly on a different event's sheet
        let other_event = EventId::new();
        let other_owner = ParticipantRef::visitor(ParticipantId::new());
        let other_sheet = SlotSheet::new(SheetId::new(), other_owner, other_event, &test_window());
        let other_span = other_sheet.slots()[0].span();
        fx.sheets.save(&other_sheet).await.unwrap();
        fx.sheets
            .claim_slot(other_sheet.id(), other_span, MeetingRequestId::new())
            .await
            .unwrap();

        let report = fx
            .handler
            .handle(ReconcileSheetsCommand {
                event_id: fx.event_id,
            })
            .await
            .unwrap();

        assert_eq!(report.sheets_scanned, 1);
        assert_eq!(report.slots_released, 0);
        // The other event's anomaly is still there for its own sweep
        let untouched = fx
            .sheets
            .find_by_id(other_sheet.id())
            .await
            .unwrap()
            .unwrap();
        assert!(!untouched.slot_at(other_span.start()).unwrap().is_available());
    }
}

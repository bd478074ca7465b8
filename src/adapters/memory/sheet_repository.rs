//! In-Memory Slot Sheet Repository
//!
//! Stores slot sheets in memory. Useful for testing and development.
//!
//! Guarded slot transitions take the write lock for the whole
//! check-and-update, so concurrent claims for the same slot are
//! serialized exactly like the database adapter's guarded UPDATEs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, SheetId, Timestamp,
};
use crate::domain::scheduling::{SlotSheet, SlotSpan};
use crate::ports::SlotSheetRepository;

/// In-memory storage for slot sheets
#[derive(Debug, Clone)]
pub struct InMemorySlotSheetRepository {
    sheets: Arc<RwLock<HashMap<SheetId, SlotSheet>>>,
}

impl InMemorySlotSheetRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            sheets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sheets (useful for tests)
    pub async fn clear(&self) {
        self.sheets.write().await.clear();
    }

    /// Get the number of stored sheets
    pub async fn sheet_count(&self) -> usize {
        self.sheets.read().await.len()
    }
}

impl Default for InMemorySlotSheetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SlotSheetRepository for InMemorySlotSheetRepository {
    async fn save(&self, sheet: &SlotSheet) -> Result<(), DomainError> {
        let mut sheets = self.sheets.write().await;
        sheets.insert(*sheet.id(), sheet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SheetId) -> Result<Option<SlotSheet>, DomainError> {
        let sheets = self.sheets.read().await;
        Ok(sheets.get(id).cloned())
    }

    async fn find_by_owner(
        &self,
        event_id: &EventId,
        owner_id: &ParticipantId,
    ) -> Result<Option<SlotSheet>, DomainError> {
        let sheets = self.sheets.read().await;
        Ok(sheets
            .values()
            .find(|sheet| sheet.event_id() == event_id && sheet.is_owner(owner_id))
            .cloned())
    }

    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<SlotSheet>, DomainError> {
        let sheets = self.sheets.read().await;
        let mut found: Vec<SlotSheet> = sheets
            .values()
            .filter(|sheet| sheet.event_id() == event_id)
            .cloned()
            .collect();
        found.sort_by_key(|sheet| *sheet.created_at());
        Ok(found)
    }

    async fn set_visibility(&self, id: &SheetId, show: bool) -> Result<(), DomainError> {
        let mut sheets = self.sheets.write().await;
        let sheet = sheets.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SheetNotFound, "Sheet not found")
                .with_detail("sheet_id", id.to_string())
        })?;
        sheet.set_visibility(show);
        Ok(())
    }

    async fn claim_slot(
        &self,
        id: &SheetId,
        span: SlotSpan,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let mut sheets = self.sheets.write().await;
        let sheet = sheets.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SlotUnavailable,
                "No slot matches the requested span",
            )
            .with_detail("sheet_id", id.to_string())
        })?;
        sheet.claim_slot(span, request_id)
    }

    async fn book_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let mut sheets = self.sheets.write().await;
        let sheet = sheets.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InconsistentState,
                "No slot found for the resolved request",
            )
            .with_detail("sheet_id", id.to_string())
        })?;
        sheet.book_slot(slot_start, request_id)
    }

    async fn release_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let mut sheets = self.sheets.write().await;
        let sheet = sheets.get_mut(id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InconsistentState,
                "No slot found for the resolved request",
            )
            .with_detail("sheet_id", id.to_string())
        })?;
        sheet.release_slot(slot_start, request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventWindow;
    use crate::domain::foundation::{ParticipantRef, SlotState};
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

    fn test_sheet() -> SlotSheet {
        SlotSheet::new(
            SheetId::new(),
            ParticipantRef::exhibitor(ParticipantId::new()),
            EventId::new(),
            &test_window(),
        )
    }

    fn first_span(sheet: &SlotSheet) -> SlotSpan {
        sheet.slots()[0].span()
    }

    #[tokio::test]
    async fn save_and_find_by_id_roundtrips() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();

        repo.save(&sheet).await.unwrap();

        let loaded = repo.find_by_id(sheet.id()).await.unwrap().unwrap();
        assert_eq!(loaded.id(), sheet.id());
        assert_eq!(loaded.slot_count(), 2);
        assert!(!loaded.show_slots());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_sheet() {
        let repo = InMemorySlotSheetRepository::new();

        let found = repo.find_by_id(&SheetId::new()).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_by_owner_matches_event_and_owner() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        repo.save(&sheet).await.unwrap();

        let found = repo
            .find_by_owner(sheet.event_id(), &sheet.owner().id)
            .await
            .unwrap();
        assert!(found.is_some());

        // Same owner, different event
        let other_event = repo
            .find_by_owner(&EventId::new(), &sheet.owner().id)
            .await
            .unwrap();
        assert!(other_event.is_none());

        // Same event, different owner
        let other_owner = repo
            .find_by_owner(sheet.event_id(), &ParticipantId::new())
            .await
            .unwrap();
        assert!(other_owner.is_none());
    }

    #[tokio::test]
    async fn set_visibility_flips_the_flag() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        repo.save(&sheet).await.unwrap();

        repo.set_visibility(sheet.id(), true).await.unwrap();

        let loaded = repo.find_by_id(sheet.id()).await.unwrap().unwrap();
        assert!(loaded.show_slots());
    }

    #[tokio::test]
    async fn set_visibility_fails_for_unknown_sheet() {
        let repo = InMemorySlotSheetRepository::new();

        let err = repo.set_visibility(&SheetId::new(), true).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::SheetNotFound);
    }

    #[tokio::test]
    async fn claim_moves_slot_to_requested() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        repo.save(&sheet).await.unwrap();

        let request_id = MeetingRequestId::new();
        repo.claim_slot(sheet.id(), span, request_id).await.unwrap();

        let loaded = repo.find_by_id(sheet.id()).await.unwrap().unwrap();
        assert_eq!(
            loaded.slot_at(span.start()).unwrap().state(),
            SlotState::Requested(request_id)
        );
    }

    #[tokio::test]
    async fn claim_fails_when_slot_already_claimed() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        repo.save(&sheet).await.unwrap();

        repo.claim_slot(sheet.id(), span, MeetingRequestId::new())
            .await
            .unwrap();
        let err = repo
            .claim_slot(sheet.id(), span, MeetingRequestId::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[tokio::test]
    async fn claim_fails_for_unknown_span() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        repo.save(&sheet).await.unwrap();

        let start = first_span(&sheet).start();
        let bogus = SlotSpan::new(start.plus_minutes(7), start.plus_minutes(37));
        let err = repo
            .claim_slot(sheet.id(), bogus, MeetingRequestId::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[tokio::test]
    async fn book_confirms_a_claimed_slot() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        repo.save(&sheet).await.unwrap();

        let request_id = MeetingRequestId::new();
        repo.claim_slot(sheet.id(), span, request_id).await.unwrap();
        repo.book_slot(sheet.id(), span.start(), request_id)
            .await
            .unwrap();

        let loaded = repo.find_by_id(sheet.id()).await.unwrap().unwrap();
        assert_eq!(
            loaded.slot_at(span.start()).unwrap().state(),
            SlotState::Booked(request_id)
        );
    }

    #[tokio::test]
    async fn book_fails_when_slot_held_by_another_request() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        repo.save(&sheet).await.unwrap();

        repo.claim_slot(sheet.id(), span, MeetingRequestId::new())
            .await
            .unwrap();
        let err = repo
            .book_slot(sheet.id(), span.start(), MeetingRequestId::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InconsistentState);
    }

    #[tokio::test]
    async fn release_returns_slot_to_available_for_rebooking() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        repo.save(&sheet).await.unwrap();

        let first = MeetingRequestId::new();
        repo.claim_slot(sheet.id(), span, first).await.unwrap();
        repo.release_slot(sheet.id(), span.start(), first)
            .await
            .unwrap();

        // Freed slot can be claimed again
        let second = MeetingRequestId::new();
        repo.claim_slot(sheet.id(), span, second).await.unwrap();

        let loaded = repo.find_by_id(sheet.id()).await.unwrap().unwrap();
        assert_eq!(
            loaded.slot_at(span.start()).unwrap().state(),
            SlotState::Requested(second)
        );
    }

    #[tokio::test]
    async fn release_fails_for_unknown_sheet() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);

        let err = repo
            .release_slot(&SheetId::new(), span.start(), MeetingRequestId::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InconsistentState);
    }

    #[tokio::test]
    async fn concurrent_claims_for_one_slot_have_one_winner() {
        let repo = InMemorySlotSheetRepository::new();
        let sheet = test_sheet();
        let span = first_span(&sheet);
        let sheet_id = *sheet.id();
        repo.save(&sheet).await.unwrap();

        let repo_a = repo.clone();
        let repo_b = repo.clone();
        let (a, b) = tokio::join!(
            tokio::spawn(async move { repo_a.claim_slot(&sheet_id, span, MeetingRequestId::new()).await }),
            tokio::spawn(async move { repo_b.claim_slot(&sheet_id, span, MeetingRequestId::new()).await }),
        );

        let outcomes = [a.unwrap(), b.unwrap()];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.code == ErrorCode::SlotUnavailable));
    }

    #[tokio::test]
    async fn clear_removes_all_sheets() {
        let repo = InMemorySlotSheetRepository::new();
        repo.save(&test_sheet()).await.unwrap();
        repo.save(&test_sheet()).await.unwrap();

        assert_eq!(repo.sheet_count().await, 2);

        repo.clear().await;

        assert_eq!(repo.sheet_count().await, 0);
    }
}

//! PostgreSQL implementation of SlotSheetRepository.
//!
//! Persists SlotSheet aggregates. Slots live in their own table keyed by
//! `(sheet_id, slot_start)` and every state change is a single guarded
//! UPDATE, so concurrent booking attempts are serialized by the database
//! rather than by re-reading and re-writing whole sheets.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, ParticipantKind,
    ParticipantRef, SheetId, SlotState, Timestamp,
};
use crate::domain::scheduling::{Slot, SlotSheet, SlotSpan};
use crate::ports::SlotSheetRepository;

/// PostgreSQL implementation of SlotSheetRepository.
#[derive(Clone)]
pub struct PostgresSlotSheetRepository {
    pool: PgPool,
}

impl PostgresSlotSheetRepository {
    /// Creates a new PostgresSlotSheetRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotSheetRepository for PostgresSlotSheetRepository {
    async fn save(&self, sheet: &SlotSheet) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO slot_sheets (
                id, event_id, owner_id, owner_kind, show_slots, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(sheet.id().as_uuid())
        .bind(sheet.event_id().as_uuid())
        .bind(sheet.owner().id.as_uuid())
        .bind(sheet.owner().kind.as_str())
        .bind(sheet.show_slots())
        .bind(sheet.created_at().as_datetime())
        .bind(sheet.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert sheet: {}", e),
            )
        })?;

        for slot in sheet.slots() {
            insert_slot(&mut tx, sheet.id(), slot).await?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SheetId) -> Result<Option<SlotSheet>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, event_id, owner_id, owner_kind, show_slots, created_at, updated_at
            FROM slot_sheets
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sheet: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let slots = load_slots(&self.pool, id).await?;
                let sheet = row_to_sheet(row, slots)?;
                Ok(Some(sheet))
            }
            None => Ok(None),
        }
    }

    async fn find_by_owner(
        &self,
        event_id: &EventId,
        owner_id: &ParticipantId,
    ) -> Result<Option<SlotSheet>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, event_id, owner_id, owner_kind, show_slots, created_at, updated_at
            FROM slot_sheets
            WHERE event_id = $1 AND owner_id = $2
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sheet by owner: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let id: Uuid = row.try_get("id").map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
                })?;
                let sheet_id = SheetId::from_uuid(id);
                let slots = load_slots(&self.pool, &sheet_id).await?;
                let sheet = row_to_sheet(row, slots)?;
                Ok(Some(sheet))
            }
            None => Ok(None),
        }
    }

    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<SlotSheet>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_id, owner_id, owner_kind, show_slots, created_at, updated_at
            FROM slot_sheets
            WHERE event_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sheets by event: {}", e),
            )
        })?;

        let mut sheets = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id").map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
            })?;
            let sheet_id = SheetId::from_uuid(id);
            let slots = load_slots(&self.pool, &sheet_id).await?;
            let sheet = row_to_sheet(row, slots)?;
            sheets.push(sheet);
        }

        Ok(sheets)
    }

    async fn set_visibility(&self, id: &SheetId, show: bool) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE slot_sheets SET
                show_slots = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(show)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update sheet visibility: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SheetNotFound,
                format!("Sheet not found: {}", id),
            )
            .with_detail("sheet_id", id.to_string()));
        }

        Ok(())
    }

    async fn claim_slot(
        &self,
        id: &SheetId,
        span: SlotSpan,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sheet_slots SET
                status = 'requested',
                meeting_request_id = $4
            WHERE sheet_id = $1 AND slot_start = $2 AND slot_end = $3
              AND status = 'available'
            "#,
        )
        .bind(id.as_uuid())
        .bind(span.start().as_datetime())
        .bind(span.end().as_datetime())
        .bind(request_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to claim slot: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SlotUnavailable,
                "Slot is not available",
            )
            .with_detail("sheet_id", id.to_string())
            .with_detail("slot_start", span.start().to_string()));
        }

        Ok(())
    }

    async fn book_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sheet_slots SET
                status = 'booked'
            WHERE sheet_id = $1 AND slot_start = $2
              AND status = 'requested' AND meeting_request_id = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(slot_start.as_datetime())
        .bind(request_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to book slot: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InconsistentState,
                "Slot is not held by the expected request, cannot book",
            )
            .with_detail("sheet_id", id.to_string())
            .with_detail("expected_request_id", request_id.to_string()));
        }

        Ok(())
    }

    async fn release_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sheet_slots SET
                status = 'available',
                meeting_request_id = NULL
            WHERE sheet_id = $1 AND slot_start = $2
              AND status = 'requested' AND meeting_request_id = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(slot_start.as_datetime())
        .bind(request_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to release slot: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InconsistentState,
                "Slot is not held by the expected request, cannot release",
            )
            .with_detail("sheet_id", id.to_string())
            .with_detail("expected_request_id", request_id.to_string()));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

async fn insert_slot(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    sheet_id: &SheetId,
    slot: &Slot,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO sheet_slots (
            sheet_id, slot_start, slot_end, status, meeting_request_id
        ) VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(sheet_id.as_uuid())
    .bind(slot.start().as_datetime())
    .bind(slot.end().as_datetime())
    .bind(slot.state().as_str())
    .bind(slot.state().request_id().map(|id| *id.as_uuid()))
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to insert slot: {}", e),
        )
    })?;

    Ok(())
}

async fn load_slots(pool: &PgPool, sheet_id: &SheetId) -> Result<Vec<Slot>, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT slot_start, slot_end, status, meeting_request_id
        FROM sheet_slots
        WHERE sheet_id = $1
        ORDER BY slot_start ASC
        "#,
    )
    .bind(sheet_id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to load slots: {}", e),
        )
    })?;

    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        slots.push(row_to_slot(row)?);
    }

    Ok(slots)
}

fn row_to_slot(row: sqlx::postgres::PgRow) -> Result<Slot, DomainError> {
    let slot_start: chrono::DateTime<chrono::Utc> = row.try_get("slot_start").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get slot_start: {}", e),
        )
    })?;

    let slot_end: chrono::DateTime<chrono::Utc> = row.try_get("slot_end").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get slot_end: {}", e),
        )
    })?;

    let status: String = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;

    let request_id: Option<Uuid> = row.try_get("meeting_request_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get meeting_request_id: {}", e),
        )
    })?;

    let state = slot_state_from_parts(&status, request_id)?;

    Ok(Slot::reconstitute(
        Timestamp::from_datetime(slot_start),
        Timestamp::from_datetime(slot_end),
        state,
    ))
}

fn row_to_sheet(row: sqlx::postgres::PgRow, slots: Vec<Slot>) -> Result<SlotSheet, DomainError> {
    let id: Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let event_id: Uuid = row.try_get("event_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get event_id: {}", e),
        )
    })?;

    let owner_id: Uuid = row.try_get("owner_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get owner_id: {}", e),
        )
    })?;

    let owner_kind_str: String = row.try_get("owner_kind").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get owner_kind: {}", e),
        )
    })?;
    let owner_kind = str_to_participant_kind(&owner_kind_str)?;

    let show_slots: bool = row.try_get("show_slots").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get show_slots: {}", e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get created_at: {}", e),
        )
    })?;

    let updated_at: chrono::DateTime<chrono::Utc> = row.try_get("updated_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get updated_at: {}", e),
        )
    })?;

    Ok(SlotSheet::reconstitute(
        SheetId::from_uuid(id),
        ParticipantRef::new(ParticipantId::from_uuid(owner_id), owner_kind),
        EventId::from_uuid(event_id),
        show_slots,
        slots,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn str_to_participant_kind(s: &str) -> Result<ParticipantKind, DomainError> {
    s.parse::<ParticipantKind>().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid owner kind: {}", e),
        )
    })
}

fn slot_state_from_parts(
    status: &str,
    request_id: Option<Uuid>,
) -> Result<SlotState, DomainError> {
    match (status, request_id) {
        ("available", _) => Ok(SlotState::Available),
        ("requested", Some(id)) => Ok(SlotState::Requested(MeetingRequestId::from_uuid(id))),
        ("booked", Some(id)) => Ok(SlotState::Booked(MeetingRequestId::from_uuid(id))),
        ("requested", None) | ("booked", None) => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Slot status '{}' has no meeting_request_id", status),
        )),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid slot status: {}", status),
        )),
    }
}

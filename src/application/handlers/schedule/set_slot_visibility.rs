//! SetSlotVisibilityHandler - Command handler for sharing or hiding a sheet's slots.

use std::sync::Arc;

use crate::domain::foundation::{ParticipantId, SheetId};
use crate::domain::scheduling::ScheduleError;
use crate::ports::SlotSheetRepository;

/// Command to change whether a sheet's slots are visible to counterparts.
#[derive(Debug, Clone)]
pub struct SetSlotVisibilityCommand {
    pub sheet_id: SheetId,
    pub caller: ParticipantId,
    pub show: bool,
}

/// Result of a visibility change.
#[derive(Debug, Clone)]
pub struct SetSlotVisibilityResult {
    pub sheet_id: SheetId,
    pub show_slots: bool,
}

/// Handler for visibility changes.
pub struct SetSlotVisibilityHandler {
    sheets: Arc<dyn SlotSheetRepository>,
}

impl SetSlotVisibilityHandler {
    pub fn new(sheets: Arc<dyn SlotSheetRepository>) -> Self {
        Self { sheets }
    }

    pub async fn handle(
        &self,
        cmd: SetSlotVisibilityCommand,
    ) -> Result<SetSlotVisibilityResult, ScheduleError> {
        // 1. Load the sheet
        let sheet = self
            .sheets
            .find_by_id(&cmd.sheet_id)
            .await?
            .ok_or_else(|| ScheduleError::sheet_not_found(cmd.sheet_id))?;

        // 2. Only the owner may change visibility
        sheet.authorize_owner(&cmd.caller)?;

        // 3. Persist the flag; slots are untouched
        self.sheets.set_visibility(&cmd.sheet_id, cmd.show).await?;

        Ok(SetSlotVisibilityResult {
            sheet_id: cmd.sheet_id,
            show_slots: cmd.show,
        })
    }
}

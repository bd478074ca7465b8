//! GenerateSheetHandler - Command handler for creating a participant's slot sheet.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantRef, SheetId};
use crate::domain::scheduling::{ScheduleError, SlotSheet};
use crate::ports::{EventDirectory, SlotSheetRepository};

/// Command to generate a slot sheet for a participant at an event.
#[derive(Debug, Clone)]
pub struct GenerateSheetCommand {
    pub event_id: EventId,
    pub owner: ParticipantRef,
}

/// Result of sheet generation.
#[derive(Debug, Clone)]
pub struct GenerateSheetResult {
    pub sheet: SlotSheet,
    /// False when the participant already had a sheet for this event.
    pub created: bool,
}

/// Handler for generating slot sheets.
pub struct GenerateSheetHandler {
    sheets: Arc<dyn SlotSheetRepository>,
    events: Arc<dyn EventDirectory>,
}

impl GenerateSheetHandler {
    pub fn new(sheets: Arc<dyn SlotSheetRepository>, events: Arc<dyn EventDirectory>) -> Self {
        Self { sheets, events }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSheetCommand,
    ) -> Result<GenerateSheetResult, ScheduleError> {
        // 1. A sheet is generated once per (participant, event); reuse it
        if let Some(sheet) = self
            .sheets
            .find_by_owner(&cmd.event_id, &cmd.owner.id)
            .await?
        {
            return Ok(GenerateSheetResult {
                sheet,
                created: false,
            });
        }

        // 2. Only registered participants get a sheet
        let registered = self
            .events
            .is_participant_registered(&cmd.event_id, &cmd.owner)
            .await?;
        if !registered {
            return Err(ScheduleError::forbidden(
                "Participant is not registered for this event",
            ));
        }

        // 3. Generate the full slot list from the event window
        let window = self
            .events
            .event_window(&cmd.event_id)
            .await?
            .ok_or_else(|| ScheduleError::event_not_found(cmd.event_id))?;
        let sheet = SlotSheet::new(SheetId::new(), cmd.owner, cmd.event_id, &window);

        // 4. Persist
        self.sheets.save(&sheet).await?;

        Ok(GenerateSheetResult {
            sheet,
            created: true,
        })
    }
}

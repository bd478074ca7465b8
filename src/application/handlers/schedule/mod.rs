//! Schedule command and query handlers.

mod generate_sheet;
mod list_available_slots;
mod reconcile_sheets;
mod set_slot_visibility;

pub use generate_sheet::{GenerateSheetCommand, GenerateSheetHandler, GenerateSheetResult};
pub use list_available_slots::{
    ListAvailableSlotsHandler, ListAvailableSlotsQuery, ListAvailableSlotsResult,
};
pub use reconcile_sheets::{ReconcileSheetsCommand, ReconcileSheetsHandler, ReconcileSheetsResult};
pub use set_slot_visibility::{
    SetSlotVisibilityCommand, SetSlotVisibilityHandler, SetSlotVisibilityResult,
};

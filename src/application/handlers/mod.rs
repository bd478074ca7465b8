//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod meeting;
pub mod schedule;

pub use meeting::{
    CancelRequestCommand, CancelRequestHandler, CancelRequestResult, DaySchedule,
    ListConfirmedMeetingsHandler, ListConfirmedMeetingsQuery, ListConfirmedMeetingsResult,
    ListPendingRequestsHandler, ListPendingRequestsQuery, ListPendingRequestsResult,
    RequestSlotCommand, RequestSlotHandler, RequestSlotResult, RespondToRequestCommand,
    RespondToRequestHandler, RespondToRequestResult,
};
pub use schedule::{
    GenerateSheetCommand, GenerateSheetHandler, GenerateSheetResult, ListAvailableSlotsHandler,
    ListAvailableSlotsQuery, ListAvailableSlotsResult, ReconcileSheetsCommand,
    ReconcileSheetsHandler, ReconcileSheetsResult, SetSlotVisibilityCommand,
    SetSlotVisibilityHandler, SetSlotVisibilityResult,
};

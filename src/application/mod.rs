//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Schedule handlers
    GenerateSheetCommand, GenerateSheetHandler, GenerateSheetResult,
    ListAvailableSlotsHandler, ListAvailableSlotsQuery, ListAvailableSlotsResult,
    ReconcileSheetsCommand, ReconcileSheetsHandler, ReconcileSheetsResult,
    SetSlotVisibilityCommand, SetSlotVisibilityHandler, SetSlotVisibilityResult,
    // Meeting handlers
    CancelRequestCommand, CancelRequestHandler, CancelRequestResult,
    DaySchedule, ListConfirmedMeetingsHandler, ListConfirmedMeetingsQuery,
    ListConfirmedMeetingsResult, ListPendingRequestsHandler, ListPendingRequestsQuery,
    ListPendingRequestsResult, RequestSlotCommand, RequestSlotHandler, RequestSlotResult,
    RespondToRequestCommand, RespondToRequestHandler, RespondToRequestResult,
};

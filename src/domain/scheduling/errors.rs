//! Scheduling-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, EventId, SheetId};

/// Errors raised by sheet management and slot listing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Event was not found.
    EventNotFound(EventId),
    /// Sheet was not found.
    SheetNotFound(String),
    /// Caller may not perform this operation.
    Forbidden(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ScheduleError {
    pub fn event_not_found(id: EventId) -> Self {
        ScheduleError::EventNotFound(id)
    }
    pub fn sheet_not_found(id: SheetId) -> Self {
        ScheduleError::SheetNotFound(format!("Sheet not found: {}", id))
    }
    pub fn no_sheet_for_owner() -> Self {
        ScheduleError::SheetNotFound("Participant has no slot sheet for this event".to_string())
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        ScheduleError::Forbidden(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ScheduleError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::EventNotFound(_) => ErrorCode::EventNotFound,
            ScheduleError::SheetNotFound(_) => ErrorCode::SheetNotFound,
            ScheduleError::Forbidden(_) => ErrorCode::Forbidden,
            ScheduleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ScheduleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ScheduleError::EventNotFound(id) => format!("Event not found: {}", id),
            ScheduleError::SheetNotFound(msg) => msg.clone(),
            ScheduleError::Forbidden(msg) => msg.clone(),
            ScheduleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ScheduleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScheduleError {}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ScheduleError::Forbidden(err.message),
            ErrorCode::ValidationFailed => ScheduleError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ScheduleError::Infrastructure(err.to_string()),
        }
    }
}

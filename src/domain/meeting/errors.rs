//! Meeting-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, MeetingRequestId, RequestStatus};

/// Errors raised by booking operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingError {
    /// Sheet was not found.
    SheetNotFound(String),
    /// Request was not found.
    RequestNotFound(MeetingRequestId),
    /// Caller may not perform this operation.
    Forbidden(String),
    /// Targeted slot does not exist or is not open for booking.
    SlotUnavailable(String),
    /// Request is no longer pending.
    AlreadyResolved(String),
    /// Request and slot state disagree; reported, never masked.
    InconsistentState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl MeetingError {
    pub fn no_sheet_for_requestee() -> Self {
        MeetingError::SheetNotFound(
            "Requested participant has no slot sheet for this event".to_string(),
        )
    }
    pub fn request_not_found(id: MeetingRequestId) -> Self {
        MeetingError::RequestNotFound(id)
    }
    pub fn forbidden(message: impl Into<String>) -> Self {
        MeetingError::Forbidden(message.into())
    }
    pub fn already_resolved(id: MeetingRequestId, status: RequestStatus) -> Self {
        MeetingError::AlreadyResolved(format!("Request {} is already {}", id, status))
    }
    pub fn inconsistent(message: impl Into<String>) -> Self {
        MeetingError::InconsistentState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MeetingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        MeetingError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            MeetingError::SheetNotFound(_) => ErrorCode::SheetNotFound,
            MeetingError::RequestNotFound(_) => ErrorCode::RequestNotFound,
            MeetingError::Forbidden(_) => ErrorCode::Forbidden,
            MeetingError::SlotUnavailable(_) => ErrorCode::SlotUnavailable,
            MeetingError::AlreadyResolved(_) => ErrorCode::AlreadyResolved,
            MeetingError::InconsistentState(_) => ErrorCode::InconsistentState,
            MeetingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MeetingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            MeetingError::SheetNotFound(msg) => msg.clone(),
            MeetingError::RequestNotFound(id) => format!("Meeting request not found: {}", id),
            MeetingError::Forbidden(msg) => msg.clone(),
            MeetingError::SlotUnavailable(msg) => msg.clone(),
            MeetingError::AlreadyResolved(msg) => msg.clone(),
            MeetingError::InconsistentState(msg) => {
                format!("Request and slot state disagree: {}", msg)
            }
            MeetingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MeetingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MeetingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MeetingError {}

impl From<DomainError> for MeetingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => MeetingError::Forbidden(err.message),
            ErrorCode::SlotUnavailable => MeetingError::SlotUnavailable(err.message),
            ErrorCode::AlreadyResolved => MeetingError::AlreadyResolved(err.message),
            ErrorCode::InconsistentState => MeetingError::InconsistentState(err.message),
            ErrorCode::ValidationFailed => MeetingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MeetingError::Infrastructure(err.to_string()),
        }
    }
}

//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Expomeet domain.

mod auth;
mod errors;
mod ids;
mod participant;
mod request_status;
mod slot_state;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedParticipant};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EventId, MeetingRequestId, ParticipantId, SheetId};
pub use participant::{ParticipantKind, ParticipantRef};
pub use request_status::RequestStatus;
pub use slot_state::SlotState;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

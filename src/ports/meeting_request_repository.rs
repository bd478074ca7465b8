//! Meeting request repository port (write side).
//!
//! Defines the contract for persisting meeting requests. Resolution is
//! a guarded transition so that two concurrent responders cannot both
//! resolve the same request.

use crate::domain::foundation::{DomainError, MeetingRequestId, RequestStatus, Timestamp};
use crate::domain::meeting::MeetingRequest;
use async_trait::async_trait;

/// Repository port for meeting request persistence.
#[async_trait]
pub trait MeetingRequestRepository: Send + Sync {
    /// Persist a newly created request.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, request: &MeetingRequest) -> Result<(), DomainError>;

    /// Find a request by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(
        &self,
        id: &MeetingRequestId,
    ) -> Result<Option<MeetingRequest>, DomainError>;

    /// Atomically move a request from pending to the given resolution.
    ///
    /// Returns `true` if this call performed the transition and `false`
    /// if the request was no longer pending, so the caller can report
    /// `AlreadyResolved` without a second read.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` if the request doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn resolve(
        &self,
        id: &MeetingRequestId,
        resolution: RequestStatus,
        responded_at: Timestamp,
    ) -> Result<bool, DomainError>;
}

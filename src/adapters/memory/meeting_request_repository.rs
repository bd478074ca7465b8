//! In-Memory Meeting Request Repository
//!
//! Stores meeting requests in memory and serves both the write
//! repository and the read-side queries from the same store. Useful
//! for testing and development.
//!
//! Resolution holds the write lock across the pending check and the
//! status update, matching the database adapter's guarded UPDATE.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, RequestStatus, Timestamp,
};
use crate::domain::meeting::MeetingRequest;
use crate::ports::{MeetingReader, MeetingRequestRepository};

/// In-memory storage for meeting requests
#[derive(Debug, Clone)]
pub struct InMemoryMeetingRequestRepository {
    requests: Arc<RwLock<HashMap<MeetingRequestId, MeetingRequest>>>,
}

impl InMemoryMeetingRequestRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored requests (useful for tests)
    pub async fn clear(&self) {
        self.requests.write().await.clear();
    }

    /// Get the number of stored requests
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

impl Default for InMemoryMeetingRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeetingRequestRepository for InMemoryMeetingRequestRepository {
    async fn create(&self, request: &MeetingRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().await;
        requests.insert(*request.id(), request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MeetingRequestId,
    ) -> Result<Option<MeetingRequest>, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests.get(id).cloned())
    }

    async fn resolve(
        &self,
        id: &MeetingRequestId,
        resolution: RequestStatus,
        responded_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let mut requests = self.requests.write().await;
        let request = requests.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::RequestNotFound, "Meeting request not found")
                .with_detail("meeting_request_id", id.to_string())
        })?;

        if !request.status().is_pending() {
            return Ok(false);
        }

        *request = MeetingRequest::reconstitute(
            *request.id(),
            *request.event_id(),
            *request.requester(),
            *request.requestee(),
            *request.sheet_id(),
            request.slot_start(),
            request.slot_end(),
            resolution,
            *request.created_at(),
            Some(responded_at),
        );
        Ok(true)
    }
}

#[async_trait]
impl MeetingReader for InMemoryMeetingRequestRepository {
    async fn confirmed_meetings(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut meetings: Vec<MeetingRequest> = requests
            .values()
            .filter(|r| r.status() == RequestStatus::Accepted)
            .filter(|r| r.involves(participant_id))
            .filter(|r| event_id.map_or(true, |e| r.event_id() == e))
            .cloned()
            .collect();
        meetings.sort_by_key(|r| r.slot_start());
        Ok(meetings)
    }

    async fn pending_for_requestee(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut pending: Vec<MeetingRequest> = requests
            .values()
            .filter(|r| r.status().is_pending())
            .filter(|r| r.is_requestee(participant_id))
            .filter(|r| event_id.map_or(true, |e| r.event_id() == e))
            .cloned()
            .collect();
        pending.sort_by_key(|r| *r.created_at());
        Ok(pending)
    }

    async fn pending_from_requester(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut pending: Vec<MeetingRequest> = requests
            .values()
            .filter(|r| r.status().is_pending())
            .filter(|r| r.is_requester(participant_id))
            .filter(|r| event_id.map_or(true, |e| r.event_id() == e))
            .cloned()
            .collect();
        pending.sort_by_key(|r| *r.created_at());
        Ok(pending)
    }
}

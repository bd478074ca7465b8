//! Participant repository port.
//!
//! Exhibitors and visitors are owned by the registration side of the
//! system; scheduling only ever needs to resolve a participant
//! reference to a display name. Lookup dispatches on the typed kind,
//! never on a runtime model name.

use crate::domain::foundation::{DomainError, ParticipantRef};
use async_trait::async_trait;

/// Read-only port onto the participant records.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// The participant's display name.
    ///
    /// Returns `None` if no participant record matches the reference.
    async fn display_name(
        &self,
        participant: &ParticipantRef,
    ) -> Result<Option<String>, DomainError>;
}

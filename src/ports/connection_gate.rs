//! Connection gate port.
//!
//! A connection is the scan record two participants create when they
//! meet on the floor. It gates who may view and request whose slots;
//! this service never creates connections, it only asks about them.

use crate::domain::foundation::{DomainError, EventId, ParticipantId};
use async_trait::async_trait;

/// Read-only port onto the connection/scan collaborator.
#[async_trait]
pub trait ConnectionGate: Send + Sync {
    /// Whether the two participants have a connection for this event.
    ///
    /// Symmetric: the order of `a` and `b` doesn't matter.
    async fn has_connection(
        &self,
        event_id: &EventId,
        a: &ParticipantId,
        b: &ParticipantId,
    ) -> Result<bool, DomainError>;
}

//! Notifier port.
//!
//! Delivery of booking notifications to participants. Callers treat
//! delivery as fire-and-forget: a failed notification is logged and
//! never fails the operation that triggered it.

use crate::domain::foundation::{DomainError, ParticipantId};
use async_trait::async_trait;

/// Port for sending notifications to participants.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification to one participant.
    ///
    /// # Errors
    ///
    /// - `NotificationError` on delivery failure; callers log and move on
    async fn notify(
        &self,
        recipient: &ParticipantId,
        title: &str,
        body: &str,
    ) -> Result<(), DomainError>;
}

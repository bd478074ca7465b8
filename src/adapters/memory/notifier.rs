//! In-memory notifier for testing.
//!
//! Records every notification instead of delivering it, so tests can
//! assert on what was sent. A failing variant exercises the paths that
//! must survive delivery errors.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId};
use crate::ports::Notifier;

/// A notification captured by the in-memory notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub recipient: ParticipantId,
    pub title: String,
    pub body: String,
}

/// In-memory notifier for testing.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    sent: RwLock<Vec<SentNotification>>,
    force_error: RwLock<Option<DomainError>>,
}

impl InMemoryNotifier {
    /// Creates a notifier that records every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier whose deliveries all fail.
    pub fn failing() -> Self {
        let notifier = Self::default();
        *notifier.force_error.write().unwrap() = Some(DomainError::new(
            ErrorCode::NotificationError,
            "Notification delivery failed",
        ));
        notifier
    }

    /// Returns every notification sent so far.
    pub fn sent_notifications(&self) -> Vec<SentNotification> {
        self.sent.read().unwrap().clone()
    }

    /// Returns the number of notifications sent.
    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(
        &self,
        recipient: &ParticipantId,
        title: &str,
        body: &str,
    ) -> Result<(), DomainError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.sent.write().unwrap().push(SentNotification {
            recipient: *recipient,
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

//! HTTP adapter for the Notifier port.
//!
//! Delivers notifications by POSTing to the platform's notification
//! service. Delivery is best effort; callers log failures and move on.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId};
use crate::ports::Notifier;

/// Notification service configuration.
pub struct HttpNotifierConfig {
    /// Base URL of the notification service.
    base_url: String,

    /// Bearer token for the notification service.
    api_key: SecretString,
}

impl HttpNotifierConfig {
    /// Create a new configuration.
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }

    fn delivery_url(&self) -> String {
        format!("{}/v1/notifications", self.base_url.trim_end_matches('/'))
    }
}

/// Wire format for one delivery.
#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    recipient_id: &'a ParticipantId,
    title: &'a str,
    body: &'a str,
}

/// HTTP implementation of the Notifier port.
pub struct HttpNotifier {
    config: HttpNotifierConfig,
    http_client: reqwest::Client,
}

impl HttpNotifier {
    /// Create a new notifier with the given configuration.
    pub fn new(config: HttpNotifierConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        recipient: &ParticipantId,
        title: &str,
        body: &str,
    ) -> Result<(), DomainError> {
        let payload = NotificationPayload {
            recipient_id: recipient,
            title,
            body,
        };

        let response = self
            .http_client
            .post(self.config.delivery_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::NotificationError,
                    format!("Failed to deliver notification: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Notification service returned {}", status),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for HttpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNotifier")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builds_delivery_url_without_double_slash() {
        let config = HttpNotifierConfig::new(
            "https://notify.example.com/",
            SecretString::new("key".to_string()),
        );
        assert_eq!(
            config.delivery_url(),
            "https://notify.example.com/v1/notifications"
        );
    }

    #[test]
    fn payload_serializes_expected_shape() {
        let recipient = ParticipantId::new();
        let payload = NotificationPayload {
            recipient_id: &recipient,
            title: "New meeting request",
            body: "Dana requested a meeting",
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["recipient_id"], recipient.to_string());
        assert_eq!(value["title"], "New meeting request");
        assert_eq!(value["body"], "Dana requested a meeting");
    }
}

//! Notification delivery configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Notification configuration (push delivery service)
///
/// When disabled, deliveries are swallowed instead of sent. The section
/// is optional so local setups run without a delivery service.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Whether to deliver notifications at all
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the delivery service
    #[serde(default)]
    pub base_url: String,

    /// API key for the delivery service
    #[serde(default = "default_api_key")]
    pub api_key: SecretString,
}

impl NotificationConfig {
    /// Validate notification configuration
    ///
    /// Only enforced when delivery is enabled.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFICATION_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidNotificationUrl);
        }
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("NOTIFICATION_API_KEY"));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: default_api_key(),
        }
    }
}

fn default_api_key() -> SecretString {
    SecretString::new(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_needs_nothing() {
        let config = NotificationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enabled_config_requires_base_url() {
        let config = NotificationConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_config_rejects_bad_url() {
        let config = NotificationConfig {
            enabled: true,
            base_url: "notify.example.com".to_string(),
            api_key: SecretString::new("key".to_string()),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_config_requires_api_key() {
        let config = NotificationConfig {
            enabled: true,
            base_url: "https://notify.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = NotificationConfig {
            enabled: true,
            base_url: "https://notify.example.com".to_string(),
            api_key: SecretString::new("nk_live_xxx".to_string()),
        };
        assert!(config.validate().is_ok());
    }
}

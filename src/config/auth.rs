//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (platform JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Expected token issuer
    pub jwt_issuer: String,

    /// Shared signing secret for HS256 tokens
    pub jwt_secret: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a signing secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_ISSUER"));
        }
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_issuer: String::new(),
            jwt_secret: SecretString::new(String::new()),
        }
    }
}

//! Session validation port for bearer token validation.
//!
//! This port defines the contract for validating access tokens and
//! extracting the calling participant's identity. It is provider-agnostic:
//! the production adapter verifies locally issued JWTs, the mock adapter
//! serves tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedParticipant};

/// Validates access tokens and extracts the participant identity.
///
/// HTTP middleware uses this to validate Bearer tokens before any
/// handler runs.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token and return the authenticated participant.
    ///
    /// `token` is the raw token without the "Bearer " prefix.
    async fn validate(&self, token: &str) -> Result<AuthenticatedParticipant, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_validator_is_object_safe() {
        fn _accepts_dyn(_validator: &dyn SessionValidator) {}
    }
}

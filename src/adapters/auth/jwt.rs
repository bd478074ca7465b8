//! JWT adapter for bearer token validation.
//!
//! This adapter implements the `SessionValidator` port for tokens issued
//! by the event platform itself. Tokens are HS256-signed with a shared
//! secret and carry the participant's id and kind as claims:
//!
//! 1. Validating the token signature against the shared secret
//! 2. Validating issuer and expiry claims
//! 3. Mapping claims to the domain `AuthenticatedParticipant` type

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AuthError, AuthenticatedParticipant, ParticipantId, ParticipantKind, ParticipantRef,
};
use crate::ports::SessionValidator;

/// Configuration for the JWT session validator.
pub struct JwtConfig {
    /// Expected issuer claim. Tokens from any other issuer are rejected.
    pub issuer: String,

    /// Shared HS256 signing secret.
    pub secret: SecretString,
}

impl JwtConfig {
    /// Create a new configuration.
    pub fn new(issuer: impl Into<String>, secret: SecretString) -> Self {
        Self {
            issuer: issuer.into(),
            secret,
        }
    }
}

/// Claims carried by platform-issued participant tokens.
#[derive(Debug, Serialize, Deserialize)]
struct ParticipantClaims {
    /// Subject - the participant ID
    sub: String,

    /// Participant kind ("exhibitor" or "visitor")
    kind: String,

    /// Issuer
    iss: String,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,

    /// Display name, if the token carries one
    #[serde(default)]
    name: Option<String>,
}

/// JWT session validator.
///
/// This is the production implementation of `SessionValidator`.
pub struct JwtSessionValidator {
    config: JwtConfig,
}

impl JwtSessionValidator {
    /// Create a new validator.
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedParticipant, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes());

        let token_data = decode::<ParticipantClaims>(token, &decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = token_data.claims;

        let participant_id = claims.sub.parse::<ParticipantId>().map_err(|_| {
            tracing::warn!("Invalid participant ID in token");
            AuthError::InvalidToken
        })?;

        let kind = claims.kind.parse::<ParticipantKind>().map_err(|_| {
            tracing::warn!(kind = %claims.kind, "Unknown participant kind in token");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedParticipant::new(
            ParticipantRef::new(participant_id, kind),
            claims.name,
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test-signing-secret";
    const TEST_ISSUER: &str = "https://events.example.com";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(
            TEST_ISSUER,
            SecretString::new(TEST_SECRET.to_string()),
        ))
    }

    fn sign(claims: &ParticipantClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> ParticipantClaims {
        ParticipantClaims {
            sub: ParticipantId::new().to_string(),
            kind: "visitor".to_string(),
            iss: TEST_ISSUER.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            name: Some("Test Visitor".to_string()),
        }
    }

    #[tokio::test]
    async fn valid_token_yields_the_participant() {
        let claims = valid_claims();
        let token = sign(&claims, TEST_SECRET);

        let auth = validator().validate(&token).await.unwrap();

        assert_eq!(auth.participant.id.to_string(), claims.sub);
        assert_eq!(auth.participant.kind, ParticipantKind::Visitor);
        assert_eq!(auth.display_name, Some("Test Visitor".to_string()));
    }

    #[tokio::test]
    async fn exhibitor_kind_is_mapped() {
        let mut claims = valid_claims();
        claims.kind = "exhibitor".to_string();
        let token = sign(&claims, TEST_SECRET);

        let auth = validator().validate(&token).await.unwrap();

        assert_eq!(auth.participant.kind, ParticipantKind::Exhibitor);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let mut claims = valid_claims();
        // Past the default validation leeway
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(&claims, TEST_SECRET);

        let result = validator().validate(&token).await;

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = sign(&valid_claims(), "some-other-secret");

        let result = validator().validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let mut claims = valid_claims();
        claims.iss = "https://somewhere-else.example.com".to_string();
        let token = sign(&claims, TEST_SECRET);

        let result = validator().validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn unknown_kind_is_rejected() {
        let mut claims = valid_claims();
        claims.kind = "organizer".to_string();
        let token = sign(&claims, TEST_SECRET);

        let result = validator().validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn malformed_subject_is_rejected() {
        let mut claims = valid_claims();
        claims.sub = "not-a-uuid".to_string();
        let token = sign(&claims, TEST_SECRET);

        let result = validator().validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = validator().validate("not.a.jwt").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn jwt_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtSessionValidator>();
    }
}

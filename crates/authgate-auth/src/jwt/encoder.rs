//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use authgate_core::config::AuthConfig;
use authgate_core::error::AppError;
use authgate_core::result::AppResult;

use super::claims::{Claims, IssuedToken};

/// Creates signed, expiring tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in seconds.
    ttl_seconds: i64,
    /// Issuer written into every token.
    issuer: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: config.ttl_seconds(),
            issuer: config.jwt_issuer.clone(),
        }
    }

    /// Token TTL in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issues a token for `subject` starting now.
    pub fn issue(&self, subject: Uuid) -> AppResult<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// Issues a token for `subject` with `now` as its issuance time.
    pub fn issue_at(&self, subject: Uuid, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0)
            .ok_or_else(|| AppError::internal("Issuance time out of range"))?;
        let expires_at = Duration::try_seconds(self.ttl_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;

        let claims = Claims {
            sub: subject,
            jti: Uuid::new_v4(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            subject,
            token_id: claims.jti,
            issued_at,
            expires_at,
        })
    }
}

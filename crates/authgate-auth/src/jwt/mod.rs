//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use authgate_core::config::AuthConfig;
use authgate_core::result::AppResult;

pub use claims::{Claims, IssuedToken};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use error::TokenError;

/// Issues and verifies tokens with one shared signing key.
///
/// Verification never consults the revocation registry; callers layer that
/// check on top.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenCodec {
    /// Creates a codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Issues a token for `subject`, valid from now for the configured TTL.
    pub fn issue(&self, subject: Uuid) -> AppResult<IssuedToken> {
        self.encoder.issue(subject)
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, subject: Uuid, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        self.encoder.issue_at(subject, now)
    }

    /// Verifies a compact token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.decoder.verify(token)
    }

    /// Verifies a compact token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        self.decoder.verify_at(token, now)
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.encoder.ttl_seconds()
    }
}

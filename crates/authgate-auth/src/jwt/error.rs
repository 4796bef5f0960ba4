//! Reasons a token fails verification.

use thiserror::Error;

/// Codec-level verification failure.
///
/// These reasons stay internal: the auth service collapses all of them into
/// a single `Unauthenticated` error for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature, algorithm, or issuer did not match.
    #[error("token signature or issuer is invalid")]
    InvalidToken,
    /// The token is past its `exp`.
    #[error("token has expired")]
    Expired,
    /// The token could not be decoded at all.
    #[error("token is malformed")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature => Self::InvalidToken,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

//! `BearerToken` extractor: pulls the compact JWT out of the Authorization header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use authgate_core::error::AppError;

use crate::error::ApiError;

/// Raw bearer token from `Authorization: Bearer <token>`.
///
/// Only the header shape is checked here; handlers pass the token to the
/// auth service, which verifies it.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Returns the token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    tracing::debug!(reason = %e, "Missing or malformed bearer token");
                    AppError::unauthenticated("Unauthenticated")
                })?;

        Ok(Self(bearer.token().to_string()))
    }
}

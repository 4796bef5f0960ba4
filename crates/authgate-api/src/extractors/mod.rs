//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::BearerToken;
pub use json::ValidatedJson;

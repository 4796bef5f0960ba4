//! # authgate-api
//!
//! HTTP API layer for AuthGate built on Axum.
//!
//! Provides the auth and health endpoints, request validation, bearer token
//! extraction, CORS and request logging middleware, and the mapping from
//! domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Components, build_components};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

//! # authgate-entity
//!
//! Domain entity models for AuthGate. Database entities derive
//! `sqlx::FromRow` so the Postgres repositories can map rows directly.

pub mod user;

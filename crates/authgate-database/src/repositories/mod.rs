//! Postgres repository implementations for AuthGate entities.

pub mod revocation;
pub mod user;

pub use revocation::RevokedTokenRepository;
pub use user::{PgUserStore, UserStore};

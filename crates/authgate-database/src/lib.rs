//! # authgate-database
//!
//! PostgreSQL connection management, migrations, and the credential store
//! implementations (Postgres and in-memory) used by AuthGate.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::revocation::RevokedTokenRepository;
pub use repositories::user::{PgUserStore, UserStore};

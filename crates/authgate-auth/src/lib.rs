//! # authgate-auth
//!
//! The JWT authentication core of AuthGate.
//!
//! ## Modules
//!
//! - `jwt`: token issuance and verification
//! - `revocation`: registry of tokens invalidated before their natural expiry
//! - `password`: Argon2id password hashing
//! - `service`: register / login / me / logout orchestration

pub mod jwt;
pub mod password;
pub mod revocation;
pub mod service;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenCodec, TokenError};
pub use password::PasswordHasher;
pub use revocation::{
    MemoryRevocationRegistry, PgRevocationRegistry, RevocationRegistry, RevocationSweeper,
};
pub use service::{AuthService, Registration};

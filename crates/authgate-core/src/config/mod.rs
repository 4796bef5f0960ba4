//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section falls back to its defaults when absent.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod revocation;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, DEFAULT_JWT_SECRET, MAX_JWT_TTL_MINUTES};
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;
pub use self::revocation::RevocationConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`AUTHGATE__AUTH__JWT_SECRET`).
const ENV_PREFIX: &str = "AUTHGATE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Revocation registry settings.
    #[serde(default)]
    pub revocation: RevocationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `AUTHGATE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Whether any backend selected by this configuration lives in Postgres.
    pub fn needs_database(&self) -> bool {
        self.database.provider == StoreBackend::Postgres
            || self.revocation.backend == StoreBackend::Postgres
    }

    /// Reject combinations that cannot start a working server.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.needs_database() && self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url is required when a postgres backend is selected",
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }

        if self.auth.jwt_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.jwt_ttl_minutes must be greater than zero",
            ));
        }

        if self.auth.jwt_ttl_minutes > MAX_JWT_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_ttl_minutes must not exceed {MAX_JWT_TTL_MINUTES}"
            )));
        }

        Ok(())
    }
}

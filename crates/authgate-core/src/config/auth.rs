//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Secret used when none is configured. Only fit for local development.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted token TTL: one year.
pub const MAX_JWT_TTL_MINUTES: u64 = 525_600;

/// Token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Token TTL in minutes, applied once at issuance.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Value written to and required in the `iss` claim.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
}

impl AuthConfig {
    /// Token TTL in seconds, as reported to clients in `expires_in`.
    ///
    /// Clamped to [`MAX_JWT_TTL_MINUTES`] so an unvalidated config can never
    /// wrap negative.
    pub fn ttl_seconds(&self) -> i64 {
        self.jwt_ttl_minutes.min(MAX_JWT_TTL_MINUTES) as i64 * 60
    }

    /// Whether the signing secret is still the built-in placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_ttl_minutes: default_ttl(),
            jwt_issuer: default_issuer(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_ttl() -> u64 {
    60
}

fn default_issuer() -> String {
    "authgate".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_never_goes_negative() {
        let config = AuthConfig {
            jwt_ttl_minutes: u64::MAX,
            ..AuthConfig::default()
        };
        assert_eq!(config.ttl_seconds(), MAX_JWT_TTL_MINUTES as i64 * 60);

        let config = AuthConfig {
            jwt_ttl_minutes: 1_000_000_000_000_000,
            ..AuthConfig::default()
        };
        assert!(config.ttl_seconds() > 0);
    }

    #[test]
    fn test_default_secret_is_detected() {
        assert!(AuthConfig::default().uses_default_secret());

        let config = AuthConfig {
            jwt_secret: "a-real-secret".to_string(),
            ..AuthConfig::default()
        };
        assert!(!config.uses_default_secret());
    }
}

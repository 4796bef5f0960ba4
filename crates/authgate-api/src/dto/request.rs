//! Request DTOs with validation.
//!
//! Fields default to empty so a missing field surfaces as a validation
//! error on that field instead of a body rejection.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authgate_auth::Registration;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    #[validate(length(min = 1), email)]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Email address.
    #[serde(default)]
    #[validate(length(min = 1, max = 255), email)]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

//! Register, login, "who am I", and logout orchestration.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::UserStore;
use authgate_entity::user::{CreateUser, User, normalize_email};

use crate::jwt::{Claims, IssuedToken, TokenCodec};
use crate::password::PasswordHasher;
use crate::revocation::RevocationRegistry;

/// Message returned for every rejected login.
const UNAUTHORIZED: &str = "Unauthorized";
/// Message returned for every rejected bearer token.
const UNAUTHENTICATED: &str = "Unauthenticated";
/// Password hashed once to give unknown-email logins the same Argon2 cost.
const DUMMY_PASSWORD: &str = "authgate-unknown-account";

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address, normalized before storage.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Authentication service tying credentials, tokens, and revocation together.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Credential store.
    users: Arc<dyn UserStore>,
    /// Revoked token registry.
    revocations: Arc<dyn RevocationRegistry>,
    /// Token codec.
    codec: TokenCodec,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Hash verified against when the email is unknown, built on first use.
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationRegistry>,
        codec: TokenCodec,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            revocations,
            codec,
            hasher,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.codec.ttl_seconds()
    }

    /// Creates an account.
    ///
    /// Fails with `Validation` on an empty field and `Conflict` when the email
    /// is already registered.
    pub async fn register(&self, input: Registration) -> AppResult<User> {
        let name = input.name.trim().to_string();
        let email = normalize_email(&input.email);

        if name.is_empty() {
            return Err(AppError::validation("The name field is required."));
        }
        if email.is_empty() {
            return Err(AppError::validation("The email field is required."));
        }
        if input.password.is_empty() {
            return Err(AppError::validation("The password field is required."));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("The email has already been taken."));
        }

        let password_hash = self.hash(input.password).await?;

        // The store re-checks uniqueness atomically for concurrent registrations.
        let user = self
            .users
            .create(CreateUser {
                name,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }

    /// Exchanges credentials for a token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let email = normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Pay the same hashing cost as a wrong password.
                let dummy = self
                    .dummy_hash
                    .get_or_try_init(|| self.hash(DUMMY_PASSWORD.to_string()))
                    .await?;
                self.verify(password.to_string(), dummy.clone()).await?;
                warn!(email = %email, "Login failed: unknown email");
                return Err(AppError::unauthorized(UNAUTHORIZED));
            }
        };

        if !self.verify(password.to_string(), user.password_hash.clone()).await? {
            warn!(email = %email, "Login failed: wrong password");
            return Err(AppError::unauthorized(UNAUTHORIZED));
        }

        let issued = self.codec.issue(user.id)?;

        info!(
            user_id = %user.id,
            email = %email,
            token_id = %issued.token_id,
            "User logged in"
        );

        Ok(issued)
    }

    /// Resolves a bearer token to its user.
    ///
    /// A credential store failure is returned as is, not as `Unauthenticated`.
    pub async fn me(&self, token: &str) -> AppResult<User> {
        let claims = self.authenticate(token).await?;

        match self.users.find_by_id(claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %claims.sub, "Rejected token: user no longer exists");
                Err(AppError::unauthenticated(UNAUTHENTICATED))
            }
        }
    }

    /// Revokes a bearer token until its natural expiry.
    ///
    /// The token must currently authenticate, so logging out twice with the
    /// same token fails the second time.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        let claims = self.authenticate(token).await?;

        self.revocations
            .revoke(claims.jti, claims.expires_at())
            .await
            .map_err(|e| {
                error!(token_id = %claims.jti, error = %e, "Failed to revoke token");
                AppError::internal("Failed to revoke token")
            })?;

        info!(user_id = %claims.sub, token_id = %claims.jti, "User logged out");

        Ok(())
    }

    /// Verifies a token and checks it has not been revoked.
    ///
    /// Every failure collapses into `Unauthenticated`. Token problems are
    /// logged at debug level, a registry outage at warn level.
    pub async fn authenticate(&self, token: &str) -> AppResult<Claims> {
        let claims = self.codec.verify(token).map_err(|e| {
            debug!(reason = %e, "Rejected token");
            AppError::unauthenticated(UNAUTHENTICATED)
        })?;

        match self.revocations.is_revoked(claims.jti).await {
            Ok(false) => Ok(claims),
            Ok(true) => {
                debug!(token_id = %claims.jti, "Rejected token: revoked");
                Err(AppError::unauthenticated(UNAUTHENTICATED))
            }
            Err(e) => {
                warn!(token_id = %claims.jti, error = %e, "Rejected token: registry unavailable");
                Err(AppError::unauthenticated(UNAUTHENTICATED))
            }
        }
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}

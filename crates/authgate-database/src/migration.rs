//! Schema migrations and the startup schema check.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{info, warn};

use authgate_core::error::{AppError, ErrorKind};

/// Migrations embedded from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Tables the credential store and the revocation registry read and write.
pub const REQUIRED_TABLES: &[&str] = &["users", "revoked_tokens"];

/// Apply every pending AuthGate migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let latest = MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0);
    info!(
        embedded = MIGRATOR.iter().count(),
        latest_version = latest,
        "Applying AuthGate migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!(latest_version = latest, "AuthGate schema is up to date");
    Ok(())
}

/// Fail fast when a table the stores depend on is absent.
///
/// Runs whether or not migrations were applied, so a server pointed at an
/// unmigrated database refuses to start instead of failing every request.
pub async fn verify_schema(pool: &PgPool) -> Result<(), AppError> {
    let mut missing = Vec::new();

    for table in REQUIRED_TABLES {
        let present: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(*table)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Schema check failed", e)
            })?;

        if !present {
            missing.push(*table);
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    warn!(missing = ?missing, "AuthGate tables are missing");
    Err(missing_tables_error(&missing))
}

fn missing_tables_error(missing: &[&str]) -> AppError {
    AppError::configuration(format!(
        "Missing tables: {}; enable database.run_migrations or apply migrations/ manually",
        missing.join(", ")
    ))
}

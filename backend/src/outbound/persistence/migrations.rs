//! Embedded schema migrations applied at startup.
//!
//! `diesel_migrations` only drives synchronous connections, so the runner
//! opens a dedicated `PgConnection` on a blocking thread.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Join { message: String },
}

fn apply(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending migration to `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a migration
/// fails; a failed migration leaves earlier ones applied.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply(&url))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })??;
    info!(applied, "database migrations up to date");
    Ok(())
}

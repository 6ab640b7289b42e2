//! Embedded schema migrations, applied at startup.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
    #[error("migration task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Apply pending migrations on a dedicated blocking connection.
pub async fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || -> Result<usize, MigrationError> {
        let mut conn = PgConnection::establish(&url)?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply(err.to_string()))?;
        Ok(versions.len())
    })
    .await??;
    info!(applied, "database migrations complete");
    Ok(())
}

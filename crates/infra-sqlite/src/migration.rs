// Schema Bootstrap
//
// The stored version tag lives in `schema_version`. Version 0 means the
// database was never initialised and gets the create statement.

use crate::error::{map_sqlx_error, Access};
use carrito_core::error::{AppError, Result};
use sqlx::{SqliteConnection, SqlitePool};
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// Schema version declared by this code
pub const SCHEMA_VERSION: i64 = 1;

/// What bootstrap has to do for a given stored version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SchemaStep {
    /// First-ever open: create the table
    Create,
    /// Stored version is older than the code
    Upgrade { from: i64, to: i64 },
    /// Nothing to do
    Current,
    /// Stored version is newer than the code
    Downgrade { from: i64, to: i64 },
}

impl SchemaStep {
    pub(crate) fn plan(stored: i64, declared: i64) -> Self {
        match stored.cmp(&declared) {
            Ordering::Less if stored == 0 => SchemaStep::Create,
            Ordering::Less => SchemaStep::Upgrade {
                from: stored,
                to: declared,
            },
            Ordering::Equal => SchemaStep::Current,
            Ordering::Greater => SchemaStep::Downgrade {
                from: stored,
                to: declared,
            },
        }
    }
}

/// Make sure the schema exists before any query runs
pub(crate) async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await.map_err(unavailable)?;

    sqlx::query("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

    let stored = stored_version(&mut *tx).await?;

    match SchemaStep::plan(stored, SCHEMA_VERSION) {
        SchemaStep::Create => {
            info!("Creating shopping list schema (version {})", SCHEMA_VERSION);
            apply_migration(&mut *tx, include_str!("../migrations/001_create_lista_compras.sql"))
                .await?;
        }
        SchemaStep::Upgrade { from, to } => on_upgrade(&mut *tx, from, to).await?,
        SchemaStep::Current => {
            debug!(version = stored, "Schema is current");
            return tx.commit().await.map_err(unavailable);
        }
        SchemaStep::Downgrade { from, to } => {
            return Err(AppError::StorageUnavailable(format!(
                "Cannot downgrade database from version {} to {}",
                from, to
            )));
        }
    }

    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(SCHEMA_VERSION)
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

    tx.commit().await.map_err(unavailable)?;
    Ok(())
}

/// Read the stored version tag (0 when none was recorded)
pub(crate) async fn stored_version(conn: &mut SqliteConnection) -> Result<i64> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(&mut *conn)
        .await
        .map_err(unavailable)?;

    Ok(version.unwrap_or(0))
}

/// Upgrade hook
///
/// There is no migration path between schema versions: the hook only logs.
/// Existing rows are left exactly as they were.
async fn on_upgrade(_conn: &mut SqliteConnection, from: i64, to: i64) -> Result<()> {
    warn!(
        from_version = from,
        to_version = to,
        "Schema upgrade requested but no migration is defined; leaving data untouched"
    );
    Ok(())
}

/// Apply a migration script statement by statement
async fn apply_migration(conn: &mut SqliteConnection, sql: &str) -> Result<()> {
    for statement in split_statements(sql) {
        sqlx::query(&statement)
            .execute(&mut *conn)
            .await
            .map_err(unavailable)?;
    }

    Ok(())
}

/// Split a script into statements
///
/// Comment lines are dropped before splitting so a `;` inside a comment
/// never ends a statement.
fn split_statements(sql: &str) -> Vec<String> {
    let without_comments = sql
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(|statement| statement.trim().to_string())
        .filter(|statement| !statement.is_empty())
        .collect()
}

fn unavailable(err: sqlx::Error) -> AppError {
    match map_sqlx_error(err, Access::Write) {
        AppError::StorageWrite(msg) | AppError::Database(msg) => {
            AppError::StorageUnavailable(format!("Schema bootstrap failed: {}", msg))
        }
        other => other,
    }
}

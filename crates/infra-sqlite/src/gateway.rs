// Storage Gateway - owns the SQLite pool for one database file

use crate::error::{map_sqlx_error, Access};
use crate::migration::{bootstrap_schema, stored_version};
use carrito_core::error::{AppError, Result};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Default database file name
pub const DB_FILE_NAME: &str = "compras.db";

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Single-user store: a handful of connections is plenty
const MAX_CONNECTIONS: u32 = 4;

/// Process-wide handle to the shopping list database
///
/// Opened once at startup, cloned into whatever needs it, and closed at
/// shutdown. The schema is guaranteed to exist once `open` returns.
#[derive(Clone, Debug)]
pub struct StorageGateway {
    pool: SqlitePool,
}

impl StorageGateway {
    /// Open (creating if missing) the database at `database_url`
    ///
    /// Only inputs starting with `sqlite:` are parsed as URLs (including
    /// `sqlite::memory:`); anything else is taken as a file path verbatim.
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = connect_options(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        ensure_parent_dir(options.get_filename()).await?;

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Cannot open database: {}", e)))?;

        bootstrap_schema(&pool).await?;

        info!(database = %database_url, "Storage opened");
        Ok(Self { pool })
    }

    /// Open a private in-memory database (tests)
    pub async fn open_in_memory() -> Result<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Handle for queries
    pub async fn open_for_read(&self) -> Result<PoolConnection<Sqlite>> {
        debug!("Acquiring read handle");
        self.pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, Access::Read))
    }

    /// Handle for inserts, updates and deletes
    pub async fn open_for_write(&self) -> Result<PoolConnection<Sqlite>> {
        debug!("Acquiring write handle");
        self.pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, Access::Write))
    }

    /// Stored schema version tag
    pub async fn schema_version(&self) -> Result<i64> {
        let mut conn = self.open_for_read().await?;
        stored_version(&mut *conn).await
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// End of lifecycle: later opens fail with `StorageUnavailable`
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Storage closed");
    }
}

fn connect_options(location: &str) -> Result<SqliteConnectOptions> {
    if location.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(location)
            .map_err(|e| AppError::Config(format!("Invalid database location: {}", e)))
    } else {
        Ok(SqliteConnectOptions::new().filename(location))
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })
        }
        _ => Ok(()),
    }
}

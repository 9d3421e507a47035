// sqlx::Error -> AppError mapping
//
// Lives here because of the orphan rule (core cannot implement
// From<sqlx::Error> for AppError).

use carrito_core::error::AppError;

/// Kind of statement that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

// SQLite primary result codes: https://www.sqlite.org/rescode.html
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_READONLY: i32 = 8;
const SQLITE_IOERR: i32 = 10;
const SQLITE_CORRUPT: i32 = 11;
const SQLITE_FULL: i32 = 13;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_CONSTRAINT: i32 = 19;
const SQLITE_AUTH: i32 = 23;
const SQLITE_NOTADB: i32 = 26;

/// Convert a driver error into the storage error taxonomy
pub(crate) fn map_sqlx_error(err: sqlx::Error, access: Access) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // Extended codes carry the primary code in the low byte
            let primary = db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);

            match primary {
                Some(SQLITE_CORRUPT) | Some(SQLITE_NOTADB) => AppError::StorageUnavailable(
                    format!("Database file is corrupt or not a database: {}", db_err.message()),
                ),
                Some(SQLITE_CANTOPEN) | Some(SQLITE_AUTH) | Some(SQLITE_IOERR) => {
                    AppError::StorageUnavailable(format!(
                        "Cannot access database file: {}",
                        db_err.message()
                    ))
                }
                Some(code) if access == Access::Write => {
                    let reason = match code {
                        SQLITE_BUSY | SQLITE_LOCKED => "Database locked",
                        SQLITE_FULL => "Database full",
                        SQLITE_READONLY => "Database is read-only",
                        SQLITE_CONSTRAINT => "Constraint violation",
                        _ => "Write rejected",
                    };
                    AppError::StorageWrite(format!("{} [{}]: {}", reason, code, db_err.message()))
                }
                Some(code) => {
                    AppError::Database(format!("Database error [{}]: {}", code, db_err.message()))
                }
                None if access == Access::Write => {
                    AppError::StorageWrite(format!("Write rejected: {}", db_err.message()))
                }
                None => AppError::Database(format!("Database error: {}", db_err.message())),
            }
        }
        // Connection, pool and file-level failures
        sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Configuration(_)
        | sqlx::Error::WorkerCrashed => AppError::StorageUnavailable(err.to_string()),
        _ if access == Access::Write => AppError::StorageWrite(err.to_string()),
        _ => AppError::Database(err.to_string()),
    }
}

// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Missing rows are not represented here: deleting or updating an id that
/// does not exist succeeds without touching anything.
#[derive(Error, Debug)]
pub enum AppError {
    /// The database file or a handle to it could not be obtained
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The engine rejected an insert, update or delete
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// (orphan rules: core cannot name the driver's error type)

// Carrito Infrastructure - SQLite Adapter
// Implements: StorageGateway (schema bootstrap, handles), ItemRepository

mod error;
mod gateway;
mod item_repository;
mod migration;

pub use gateway::{StorageGateway, DB_FILE_NAME};
pub use item_repository::SqliteItemRepository;
pub use migration::SCHEMA_VERSION;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)

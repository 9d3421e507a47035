// Domain Layer - Pure entities

pub mod item;

// Re-exports
pub use item::{Item, ItemId};

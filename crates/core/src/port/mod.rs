// Port Layer - Interfaces for external dependencies

pub mod item_repository;

// Re-exports
pub use item_repository::ItemRepository;

#[cfg(test)]
pub use item_repository::MockItemRepository;

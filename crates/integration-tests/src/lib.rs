//! Shared fixtures for the integration tests

use carrito_core::application::ShoppingListService;
use carrito_infra_sqlite::{SqliteItemRepository, StorageGateway};
use std::sync::Arc;

/// In-memory store wired the same way the binary wires a file store
pub async fn in_memory_service() -> (StorageGateway, Arc<ShoppingListService>) {
    let gateway = StorageGateway::open_in_memory()
        .await
        .expect("in-memory store should open");
    let repo = Arc::new(SqliteItemRepository::new(gateway.clone()));
    (gateway, Arc::new(ShoppingListService::new(repo)))
}

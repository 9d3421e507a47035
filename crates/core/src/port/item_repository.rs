// Item Repository Port (Interface)

use crate::domain::{Item, ItemId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for shopping-list persistence
///
/// Every call is committed on its own; nothing spans multiple calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, pending before purchased
    async fn list_all(&self) -> Result<Vec<Item>>;

    /// Insert a new item and return the id assigned by the store
    async fn insert(&self, name: &str, purchased: bool) -> Result<ItemId>;

    /// Delete by id (missing id is a no-op)
    async fn delete(&self, id: ItemId) -> Result<()>;

    /// Delete every item
    async fn delete_all(&self) -> Result<()>;

    /// Replace name and purchased flag of the row matching `item.id` (missing id is a no-op)
    async fn update(&self, item: &Item) -> Result<()>;
}

// Shopping List Service - User actions of the list and add-item screens

use crate::domain::{Item, ItemId};
use crate::error::Result;
use crate::port::ItemRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Shopping list use cases over an injected repository
pub struct ShoppingListService {
    repo: Arc<dyn ItemRepository>,
}

impl ShoppingListService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Current list, pending items first
    pub async fn items(&self) -> Result<Vec<Item>> {
        let items = self.repo.list_all().await?;
        debug!(count = items.len(), "Loaded shopping list");
        Ok(items)
    }

    /// Add a new pending item
    ///
    /// The name is stored as given; an empty name is a valid product.
    pub async fn add(&self, name: &str) -> Result<ItemId> {
        let id = self.repo.insert(name, false).await?;
        info!(item_id = id, "Item added");
        Ok(id)
    }

    /// Flip the purchased flag of `item` and return the refreshed list
    pub async fn toggle(&self, item: &Item) -> Result<Vec<Item>> {
        let toggled = item.toggled();
        self.repo.update(&toggled).await?;
        debug!(item_id = item.id, purchased = toggled.purchased, "Item toggled");
        self.items().await
    }

    /// Look up a single item by id
    pub async fn find(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items().await?.into_iter().find(|item| item.id == id))
    }

    /// Remove one item and return the refreshed list
    pub async fn remove(&self, id: ItemId) -> Result<Vec<Item>> {
        self.repo.delete(id).await?;
        debug!(item_id = id, "Item removed");
        self.items().await
    }

    /// Remove every item
    pub async fn clear(&self) -> Result<()> {
        self.repo.delete_all().await?;
        info!("Shopping list cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::MockItemRepository;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_add_inserts_pending_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_insert()
            .withf(|name, purchased| name == "Milk" && !*purchased)
            .times(1)
            .returning(|_, _| Ok(1));

        let service = ShoppingListService::new(Arc::new(repo));
        assert_eq!(service.add("Milk").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_accepts_empty_name() {
        let mut repo = MockItemRepository::new();
        repo.expect_insert()
            .withf(|name, purchased| name.is_empty() && !*purchased)
            .times(1)
            .returning(|_, _| Ok(5));

        let service = ShoppingListService::new(Arc::new(repo));
        assert_ok!(service.add("").await);
    }

    #[tokio::test]
    async fn test_toggle_updates_then_relists() {
        let mut repo = MockItemRepository::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_update()
            .withf(|item| item.id == 1 && item.name == "Milk" && item.purchased)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_list_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![Item::new(1, "Milk", true)]));

        let service = ShoppingListService::new(Arc::new(repo));
        let items = service.toggle(&Item::new(1, "Milk", false)).await.unwrap();
        assert_eq!(items, vec![Item::new(1, "Milk", true)]);
    }

    #[tokio::test]
    async fn test_find_missing_id_is_none() {
        let mut repo = MockItemRepository::new();
        repo.expect_list_all()
            .returning(|| Ok(vec![Item::new(1, "Milk", false)]));

        let service = ShoppingListService::new(Arc::new(repo));
        assert_eq!(service.find(99).await.unwrap(), None);
        assert_eq!(
            service.find(1).await.unwrap(),
            Some(Item::new(1, "Milk", false))
        );
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repo = MockItemRepository::new();
        repo.expect_delete_all()
            .returning(|| Err(AppError::StorageWrite("disk full".to_string())));

        let service = ShoppingListService::new(Arc::new(repo));
        let err = assert_err!(service.clear().await);
        assert!(matches!(err, AppError::StorageWrite(_)));
    }
}

// SQLite ItemRepository Implementation

use crate::error::{map_sqlx_error, Access};
use crate::StorageGateway;
use async_trait::async_trait;
use carrito_core::domain::{Item, ItemId};
use carrito_core::error::Result;
use carrito_core::port::ItemRepository;
use tracing::debug;

// Ties between equal purchased flags fall back to insertion order
const LIST_ALL_SQL: &str = r#"
    SELECT id, producto, comprado
    FROM lista_compras
    ORDER BY comprado ASC, id ASC
"#;

pub struct SqliteItemRepository {
    gateway: StorageGateway,
}

impl SqliteItemRepository {
    pub fn new(gateway: StorageGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>> {
        let mut conn = self.gateway.open_for_read().await?;

        let rows: Vec<ItemRow> = sqlx::query_as(LIST_ALL_SQL)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, Access::Read))?;

        Ok(rows.into_iter().map(ItemRow::into_item).collect())
    }

    async fn insert(&self, name: &str, purchased: bool) -> Result<ItemId> {
        let mut conn = self.gateway.open_for_write().await?;

        let result = sqlx::query("INSERT INTO lista_compras (producto, comprado) VALUES (?, ?)")
            .bind(name)
            .bind(purchased)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, Access::Write))?;

        let id = result.last_insert_rowid();
        debug!(item_id = id, "Inserted item");
        Ok(id)
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut conn = self.gateway.open_for_write().await?;

        let result = sqlx::query("DELETE FROM lista_compras WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, Access::Write))?;

        // Zero rows means the id did not exist, which is fine
        debug!(item_id = id, rows = result.rows_affected(), "Deleted item");
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut conn = self.gateway.open_for_write().await?;

        let result = sqlx::query("DELETE FROM lista_compras")
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, Access::Write))?;

        debug!(rows = result.rows_affected(), "Deleted all items");
        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<()> {
        let mut conn = self.gateway.open_for_write().await?;

        let result = sqlx::query("UPDATE lista_compras SET producto = ?, comprado = ? WHERE id = ?")
            .bind(&item.name)
            .bind(item.purchased)
            .bind(item.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, Access::Write))?;

        debug!(item_id = item.id, rows = result.rows_affected(), "Updated item");
        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i64,
    producto: Option<String>,
    comprado: Option<i64>, // SQLite boolean as integer
}

impl ItemRow {
    fn into_item(self) -> Item {
        Item {
            id: self.id,
            name: self.producto.unwrap_or_default(),
            purchased: self.comprado.unwrap_or(0) != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_repo() -> SqliteItemRepository {
        let gateway = StorageGateway::open_in_memory().await.unwrap();
        SqliteItemRepository::new(gateway)
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = setup_repo().await;

        let id = repo.insert("Milk", false).await.unwrap();
        assert!(id > 0);

        let items = repo.list_all().await.unwrap();
        assert_eq!(items, vec![Item::new(id, "Milk", false)]);
    }

    #[tokio::test]
    async fn test_update_replaces_name_and_flag() {
        let repo = setup_repo().await;
        let id = repo.insert("Milk", false).await.unwrap();

        repo.update(&Item::new(id, "Oat milk", true)).await.unwrap();

        let items = repo.list_all().await.unwrap();
        assert_eq!(items, vec![Item::new(id, "Oat milk", true)]);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let repo = setup_repo().await;
        let id = repo.insert("Milk", false).await.unwrap();

        repo.update(&Item::new(id + 100, "Ghost", true)).await.unwrap();

        let items = repo.list_all().await.unwrap();
        assert_eq!(items, vec![Item::new(id, "Milk", false)]);
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let repo = setup_repo().await;
        for name in ["Eggs", "Apples", "Coffee"] {
            repo.insert(name, false).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Eggs", "Apples", "Coffee"]);
    }

    #[tokio::test]
    async fn test_null_columns_read_as_defaults() {
        let repo = setup_repo().await;
        sqlx::query("INSERT INTO lista_compras (producto, comprado) VALUES (NULL, NULL)")
            .execute(repo.gateway.pool())
            .await
            .unwrap();

        let items = repo.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "");
        assert!(!items[0].purchased);
    }
}

//! Inventory Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use chrono::Utc;
use shared::StockStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory_item";

#[derive(Clone)]
pub struct InventoryItemRepository {
    base: BaseRepository,
}

impl InventoryItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<InventoryItem>> {
        let items: Vec<InventoryItem> = self
            .base
            .db()
            .query("SELECT * FROM inventory_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<InventoryItem>> {
        let thing = parse_record_id(id)?;
        let item: Option<InventoryItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    pub async fn create(&self, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        let now = Utc::now();
        let item = InventoryItem {
            id: None,
            status: StockStatus::from_levels(data.stock, data.min_required),
            name: data.name,
            category: data.category,
            stock: data.stock,
            min_required: data.min_required,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<InventoryItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create inventory item".to_string()))
    }

    pub async fn update(&self, id: &str, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))?;

        let stock = data.stock.unwrap_or(existing.stock);
        let min_required = data.min_required.unwrap_or(existing.min_required);

        let merged = InventoryItem {
            id: None,
            name: data.name.unwrap_or(existing.name),
            category: data.category.unwrap_or(existing.category),
            stock,
            min_required,
            status: StockStatus::from_levels(stock, min_required),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated: Option<InventoryItem> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Inventory item {} not found", id)))
    }

    /// Take one unit of every stocked item. Items already at zero are
    /// left alone. Stock status bands are recomputed as part of the
    /// same statement.
    pub async fn consume_one_of_each(&self) -> RepoResult<()> {
        let items = self.find_all().await?;
        for item in items {
            let Some(id) = item.id else { continue };
            if item.stock == 0 {
                continue;
            }
            let stock = item.stock - 1;
            self.base
                .db()
                .query(
                    "UPDATE $item SET stock = $stock, status = $status, \
                     updated_at = time::now()",
                )
                .bind(("item", id))
                .bind(("stock", stock))
                .bind(("status", StockStatus::from_levels(stock, item.min_required)))
                .await?;
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<InventoryItem> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::InventoryCategory;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_consume_floors_at_zero() {
        let db = DbService::open_in_memory().await.unwrap().db;
        let repo = InventoryItemRepository::new(db);

        repo.create(InventoryItemCreate {
            name: "Soap".to_string(),
            category: InventoryCategory::Amenities,
            stock: 1,
            min_required: 2,
        })
        .await
        .unwrap();

        repo.consume_one_of_each().await.unwrap();
        repo.consume_one_of_each().await.unwrap();

        let items = repo.find_all().await.unwrap();
        assert_eq!(items[0].stock, 0);
        assert_eq!(items[0].status, StockStatus::Critical);
    }

    #[tokio::test]
    async fn test_status_recomputed_on_update() {
        let db = DbService::open_in_memory().await.unwrap().db;
        let repo = InventoryItemRepository::new(db);

        let item = repo
            .create(InventoryItemCreate {
                name: "Towels".to_string(),
                category: InventoryCategory::Housekeeping,
                stock: 100,
                min_required: 20,
            })
            .await
            .unwrap();
        assert_eq!(item.status, StockStatus::Good);

        let updated = repo
            .update(
                &item.id.unwrap().to_string(),
                InventoryItemUpdate {
                    stock: Some(21),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, StockStatus::Low);
    }
}

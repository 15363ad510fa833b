//! Menu Item Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing = parse_record_id(id)?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item)
    }

    /// Resolve a list of item references, preserving order. Errors if
    /// any reference is dangling.
    pub async fn resolve_all(&self, ids: &[RecordId]) -> RepoResult<Vec<MenuItem>> {
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            let item: Option<MenuItem> = self.base.db().select(id.clone()).await?;
            items.push(
                item.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?,
            );
        }
        Ok(items)
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = Utc::now();
        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            category: data.category,
            prep_time: data.prep_time,
            status: data.status.unwrap_or_default(),
            price: data.price,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        let merged = MenuItem {
            id: None,
            name: data.name.unwrap_or(existing.name),
            description: data.description.unwrap_or(existing.description),
            category: data.category.unwrap_or(existing.category),
            prep_time: data.prep_time.unwrap_or(existing.prep_time),
            status: data.status.unwrap_or(existing.status),
            price: data.price.unwrap_or(existing.price),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated: Option<MenuItem> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<MenuItem> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

//! Room Type Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "room_type";

#[derive(Clone)]
pub struct RoomTypeRepository {
    base: BaseRepository,
}

impl RoomTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<RoomType>> {
        let types: Vec<RoomType> = self
            .base
            .db()
            .query("SELECT * FROM room_type ORDER BY name")
            .await?
            .take(0)?;
        Ok(types)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RoomType>> {
        let thing = parse_record_id(id)?;
        let room_type: Option<RoomType> = self.base.db().select(thing).await?;
        Ok(room_type)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<RoomType>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room_type WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?;
        let types: Vec<RoomType> = result.take(0)?;
        Ok(types.into_iter().next())
    }

    pub async fn create(&self, data: RoomTypeCreate) -> RepoResult<RoomType> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room type '{}' already exists",
                data.name
            )));
        }

        let room_type = RoomType {
            id: None,
            name: data.name,
            price: data.price,
            max_guests: data.max_guests,
            extra_cost: data.extra_cost,
        };

        let created: Option<RoomType> = self.base.db().create(TABLE).content(room_type).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room type".to_string()))
    }

    pub async fn update(&self, id: &str, data: RoomTypeUpdate) -> RepoResult<RoomType> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room type {} not found", id)))?;

        if let Some(name) = &data.name {
            if let Some(found) = self.find_by_name(name).await? {
                if found.id != existing.id {
                    return Err(RepoError::Duplicate(format!(
                        "Room type '{}' already exists",
                        name
                    )));
                }
            }
        }

        let merged = RoomType {
            id: existing.id,
            name: data.name.unwrap_or(existing.name),
            price: data.price.unwrap_or(existing.price),
            max_guests: data.max_guests.unwrap_or(existing.max_guests),
            extra_cost: data.extra_cost.unwrap_or(existing.extra_cost),
        };

        let updated: Option<RoomType> = self
            .base
            .db()
            .update(thing)
            .content(RoomType { id: None, ..merged })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Room type {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<RoomType> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

//! Room Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomUpdate};
use chrono::{DateTime, Utc};
use shared::{CleaningState, RoomStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room ORDER BY number")
            .await?
            .take(0)?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing = parse_record_id(id)?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<Room>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM room WHERE number = $number LIMIT 1")
            .bind(("number", number.to_string()))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    /// Create a room. The nightly price is copied from the room type so
    /// later type edits never reprice existing rooms.
    pub async fn create(
        &self,
        number: String,
        room_type: RecordId,
        price: f64,
        status: RoomStatus,
    ) -> RepoResult<Room> {
        if self.find_by_number(&number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Room '{}' already exists",
                number
            )));
        }

        let now = Utc::now();
        let room = Room {
            id: None,
            number,
            room_type,
            price,
            status,
            guest: None,
            check_out: None,
            booking: None,
            cleaning: None,
            last_cleaned: None,
            issue: None,
            eta: None,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// Update housekeeping and maintenance fields
    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        let merged = Room {
            id: None,
            status: data.status.unwrap_or(existing.status),
            cleaning: data.cleaning.unwrap_or(existing.cleaning),
            last_cleaned: data.last_cleaned.unwrap_or(existing.last_cleaned),
            issue: data.issue.unwrap_or(existing.issue),
            eta: data.eta.unwrap_or(existing.eta),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated: Option<Room> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }

    /// Place a guest into the room for the duration of a stay.
    ///
    /// The write only applies while the room is still Available, so two
    /// concurrent check-ins cannot both claim it. Returns the updated
    /// row, or None when another request won the race.
    pub async fn mark_occupied(
        &self,
        id: &RecordId,
        guest_name: String,
        check_out: DateTime<Utc>,
        booking: RecordId,
    ) -> RepoResult<Option<Room>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $room SET status = $status, guest = $guest, check_out = $check_out, \
                 booking = $booking, cleaning = NONE, updated_at = time::now() \
                 WHERE status = $expected RETURN AFTER",
            )
            .bind(("room", id.clone()))
            .bind(("status", RoomStatus::Occupied))
            .bind(("guest", guest_name))
            .bind(("check_out", check_out))
            .bind(("booking", booking))
            .bind(("expected", RoomStatus::Available))
            .await?;
        let rooms: Vec<Room> = result.take(0)?;
        Ok(rooms.into_iter().next())
    }

    /// Clear the occupancy and queue the room for cleaning
    pub async fn release(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $room SET status = $status, guest = NONE, check_out = NONE, \
                 booking = NONE, cleaning = $cleaning, updated_at = time::now()",
            )
            .bind(("room", id.clone()))
            .bind(("status", RoomStatus::Available))
            .bind(("cleaning", CleaningState::InProgress))
            .await?;
        Ok(())
    }

    /// Restore a room to Available with no occupancy (booking rollback)
    pub async fn clear_occupancy(&self, id: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $room SET status = $status, guest = NONE, check_out = NONE, \
                 booking = NONE, updated_at = time::now()",
            )
            .bind(("room", id.clone()))
            .bind(("status", RoomStatus::Available))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<Room> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

//! Guest Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Guest, GuestCreate, GuestUpdate};
use chrono::{DateTime, Utc};
use shared::GuestStatus;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "guest";

#[derive(Clone)]
pub struct GuestRepository {
    base: BaseRepository,
}

impl GuestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Guest>> {
        let guests: Vec<Guest> = self
            .base
            .db()
            .query("SELECT * FROM guest ORDER BY name")
            .await?
            .take(0)?;
        Ok(guests)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Guest>> {
        let thing = parse_record_id(id)?;
        let guest: Option<Guest> = self.base.db().select(thing).await?;
        Ok(guest)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Guest>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM guest WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let guests: Vec<Guest> = result.take(0)?;
        Ok(guests.into_iter().next())
    }

    pub async fn create(&self, data: GuestCreate) -> RepoResult<Guest> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Guest with email '{}' already exists",
                data.email
            )));
        }

        let now = Utc::now();
        let guest = Guest {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            status: data.status.unwrap_or(GuestStatus::New),
            last_stay: None,
            visits: 1,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Guest> = self.base.db().create(TABLE).content(guest).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create guest".to_string()))
    }

    pub async fn update(&self, id: &str, data: GuestUpdate) -> RepoResult<Guest> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Guest {} not found", id)))?;

        if let Some(email) = &data.email {
            if let Some(found) = self.find_by_email(email).await? {
                if found.id != existing.id {
                    return Err(RepoError::Duplicate(format!(
                        "Guest with email '{}' already exists",
                        email
                    )));
                }
            }
        }

        let merged = Guest {
            id: None,
            name: data.name.unwrap_or(existing.name),
            email: data.email.unwrap_or(existing.email),
            phone: data.phone.unwrap_or(existing.phone),
            status: data.status.unwrap_or(existing.status),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated: Option<Guest> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Guest {} not found", id)))
    }

    /// Move a guest through the stay lifecycle
    pub async fn set_status(&self, id: &RecordId, status: GuestStatus) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $guest SET status = $status, updated_at = time::now()")
            .bind(("guest", id.clone()))
            .bind(("status", status))
            .await?;
        Ok(())
    }

    /// Close out a completed stay on the guest record
    pub async fn record_stay(&self, id: &RecordId, last_stay: DateTime<Utc>) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE $guest SET status = $status, last_stay = $last_stay, \
                 visits = visits + 1, updated_at = time::now()",
            )
            .bind(("guest", id.clone()))
            .bind(("status", GuestStatus::Past))
            .bind(("last_stay", last_stay))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<Guest> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

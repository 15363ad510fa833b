//! Service Catalog Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Service, ServiceCreate, ServiceUpdate};
use chrono::Utc;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "service";

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Service>> {
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT * FROM service ORDER BY service_name")
            .await?
            .take(0)?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        let thing = parse_record_id(id)?;
        let service: Option<Service> = self.base.db().select(thing).await?;
        Ok(service)
    }

    /// Resolve a list of service references, preserving order. Errors
    /// if any reference is dangling.
    pub async fn resolve_all(&self, ids: &[RecordId]) -> RepoResult<Vec<Service>> {
        let mut services = Vec::with_capacity(ids.len());
        for id in ids {
            let service: Option<Service> = self.base.db().select(id.clone()).await?;
            services.push(
                service.ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?,
            );
        }
        Ok(services)
    }

    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        let now = Utc::now();
        let service = Service {
            id: None,
            service_type: data.service_type,
            service_name: data.service_name,
            price: data.price,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Service> = self.base.db().create(TABLE).content(service).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    pub async fn update(&self, id: &str, data: ServiceUpdate) -> RepoResult<Service> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        let merged = Service {
            id: None,
            service_type: data.service_type.unwrap_or(existing.service_type),
            service_name: data.service_name.unwrap_or(existing.service_name),
            price: data.price.unwrap_or(existing.price),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let updated: Option<Service> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<Service> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

//! Service Request Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::ServiceRequest;
use shared::ServiceRequestStatus;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "service_request";
const REQUEST_SEQ_START: i64 = 1000;

#[derive(Clone)]
pub struct ServiceRequestRepository {
    base: BaseRepository,
}

impl ServiceRequestRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn next_request_id(&self) -> RepoResult<i64> {
        self.base.next_sequence(TABLE, REQUEST_SEQ_START).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<ServiceRequest>> {
        let requests: Vec<ServiceRequest> = self
            .base
            .db()
            .query("SELECT * FROM service_request ORDER BY request_id DESC")
            .await?
            .take(0)?;
        Ok(requests)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ServiceRequest>> {
        let thing = parse_record_id(id)?;
        let request: Option<ServiceRequest> = self.base.db().select(thing).await?;
        Ok(request)
    }

    /// Fulfilled requests, for billing.
    ///
    /// The booking link is stored as a string, so the filter binds the
    /// string form.
    pub async fn find_completed_for_booking(
        &self,
        booking: &RecordId,
    ) -> RepoResult<Vec<ServiceRequest>> {
        let requests: Vec<ServiceRequest> = self
            .base
            .db()
            .query(
                "SELECT * FROM service_request WHERE booking = $booking \
                 AND status = $status ORDER BY request_id",
            )
            .bind(("booking", booking.to_string()))
            .bind(("status", ServiceRequestStatus::Completed))
            .await?
            .take(0)?;
        Ok(requests)
    }

    pub async fn create(&self, request: ServiceRequest) -> RepoResult<ServiceRequest> {
        let created: Option<ServiceRequest> =
            self.base.db().create(TABLE).content(request).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service request".to_string()))
    }

    pub async fn set_status(
        &self,
        id: &RecordId,
        status: ServiceRequestStatus,
    ) -> RepoResult<ServiceRequest> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $request SET status = $status, updated_at = time::now() RETURN AFTER",
            )
            .bind(("request", id.clone()))
            .bind(("status", status))
            .await?;
        let requests: Vec<ServiceRequest> = result.take(0)?;
        requests
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Service request {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<ServiceRequest> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

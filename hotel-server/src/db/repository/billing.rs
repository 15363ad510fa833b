//! Billing Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::Billing;
use chrono::{DateTime, Utc};
use shared::{PaymentMethod, PaymentStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "billing";

#[derive(Clone)]
pub struct BillingRepository {
    base: BaseRepository,
}

impl BillingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Billing>> {
        let bills: Vec<Billing> = self
            .base
            .db()
            .query("SELECT * FROM billing ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(bills)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Billing>> {
        let thing = parse_record_id(id)?;
        let bill: Option<Billing> = self.base.db().select(thing).await?;
        Ok(bill)
    }

    /// At most one invoice exists per booking.
    ///
    /// The booking link is stored in its string form (that is how the
    /// model serializes record links), so the filter binds the string
    /// rather than a record value.
    pub async fn find_by_booking(&self, booking: &RecordId) -> RepoResult<Option<Billing>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM billing WHERE booking = $booking LIMIT 1")
            .bind(("booking", booking.to_string()))
            .await?;
        let bills: Vec<Billing> = result.take(0)?;
        Ok(bills.into_iter().next())
    }

    pub async fn create(&self, bill: Billing) -> RepoResult<Billing> {
        let created: Option<Billing> = self.base.db().create(TABLE).content(bill).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create bill".to_string()))
    }

    /// Replace an existing invoice with recomputed amounts
    pub async fn replace(&self, id: &RecordId, bill: Billing) -> RepoResult<Billing> {
        let updated: Option<Billing> = self
            .base
            .db()
            .update(id.clone())
            .content(Billing { id: None, ..bill })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Bill {} not found", id)))
    }

    pub async fn update_payment(
        &self,
        id: &RecordId,
        status: PaymentStatus,
        method: Option<PaymentMethod>,
        date: Option<DateTime<Utc>>,
    ) -> RepoResult<Billing> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $bill SET payment_status = $status, payment_method = $method, \
                 payment_date = $date, updated_at = time::now() RETURN AFTER",
            )
            .bind(("bill", id.clone()))
            .bind(("status", status))
            .bind(("method", method))
            .bind(("date", date))
            .await?;
        let bills: Vec<Billing> = result.take(0)?;
        bills
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Bill {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{BilledGuest, BilledRoom};
    use crate::db::DbService;

    fn sample_bill(booking: RecordId) -> Billing {
        Billing {
            id: None,
            booking,
            guest: BilledGuest {
                guest_id: "guest:asha".parse().unwrap(),
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9876543210".to_string(),
            },
            room: BilledRoom {
                room_id: "room:r101".parse().unwrap(),
                room_number: "101".to_string(),
                room_type_id: "room_type:deluxe".parse().unwrap(),
                num_nights: 2,
                num_adults: 2,
                num_children: 0,
                extra_adults: 0,
                extra_children: 0,
                total_room_price: 400.0,
            },
            food_orders: vec![],
            total_food_cost: 0.0,
            service_requests: vec![],
            total_service_cost: 0.0,
            subtotal: 400.0,
            taxes: 20.0,
            total_amount: 420.0,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            payment_date: None,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_find_by_booking_matches_stored_link() {
        let db = DbService::open_in_memory().await.unwrap().db;
        let repo = BillingRepository::new(db);

        let booking: RecordId = "booking:b1".parse().unwrap();
        let created = repo.create(sample_bill(booking.clone())).await.unwrap();

        // The stored row must be reachable through the booking link
        let found = repo.find_by_booking(&booking).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.booking, booking);

        let other: RecordId = "booking:b2".parse().unwrap();
        assert!(repo.find_by_booking(&other).await.unwrap().is_none());
    }
}

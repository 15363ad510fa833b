//! Food Order Repository

use super::{parse_record_id, BaseRepository, RepoError, RepoResult};
use crate::db::models::FoodOrder;
use shared::{KitchenStatus, ReceptionStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "food_order";
const ORDER_SEQ_START: i64 = 1000;

#[derive(Clone)]
pub struct FoodOrderRepository {
    base: BaseRepository,
}

impl FoodOrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn next_order_id(&self) -> RepoResult<i64> {
        self.base.next_sequence(TABLE, ORDER_SEQ_START).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<FoodOrder>> {
        let orders: Vec<FoodOrder> = self
            .base
            .db()
            .query("SELECT * FROM food_order ORDER BY order_id DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodOrder>> {
        let thing = parse_record_id(id)?;
        let order: Option<FoodOrder> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Orders that have reached the guest, for billing.
    ///
    /// The booking link is stored as a string, so the filter binds the
    /// string form.
    pub async fn find_delivered_for_booking(
        &self,
        booking: &RecordId,
    ) -> RepoResult<Vec<FoodOrder>> {
        let orders: Vec<FoodOrder> = self
            .base
            .db()
            .query(
                "SELECT * FROM food_order WHERE booking = $booking \
                 AND reception_status = $status ORDER BY order_id",
            )
            .bind(("booking", booking.to_string()))
            .bind(("status", ReceptionStatus::Delivered))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn create(&self, order: FoodOrder) -> RepoResult<FoodOrder> {
        let created: Option<FoodOrder> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create food order".to_string()))
    }

    /// Advance the kitchen pipeline. The reception view is derived,
    /// never set directly.
    pub async fn set_kitchen_status(
        &self,
        id: &RecordId,
        kitchen_status: KitchenStatus,
    ) -> RepoResult<FoodOrder> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $order SET kitchen_status = $kitchen, reception_status = $reception, \
                 updated_at = time::now() RETURN AFTER",
            )
            .bind(("order", id.clone()))
            .bind(("kitchen", kitchen_status))
            .bind(("reception", kitchen_status.reception_status()))
            .await?;
        let orders: Vec<FoodOrder> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Food order {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<FoodOrder> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}

//! Repository Module
//!
//! CRUD operations over the SurrealDB tables. One repository per
//! entity, all sharing the `BaseRepository` database handle.

// Rooms
pub mod room;
pub mod room_type;

// Guests and bookings
pub mod booking;
pub mod guest;

// Billing
pub mod billing;

// Consumption
pub mod food_order;
pub mod service_request;

// Catalogs
pub mod inventory_item;
pub mod menu_item;
pub mod service;

// Re-exports
pub use billing::BillingRepository;
pub use booking::BookingRepository;
pub use food_order::FoodOrderRepository;
pub use guest::GuestRepository;
pub use inventory_item::InventoryItemRepository;
pub use menu_item::MenuItemRepository;
pub use room::RoomRepository;
pub use room_type::RoomTypeRepository;
pub use service::ServiceRepository;
pub use service_request::ServiceRequestRepository;

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Allocate the next value of a named sequence.
    ///
    /// Single UPSERT statement so two concurrent allocations can never
    /// observe the same value. Sequences start at `start + 1`.
    pub async fn next_sequence(&self, name: &str, start: i64) -> RepoResult<i64> {
        #[derive(Deserialize)]
        struct Counter {
            value: i64,
        }

        let mut result = self
            .db
            .query(format!(
                "UPSERT counter:{name} SET value = (value ?? {start}) + 1 RETURN AFTER"
            ))
            .await?;
        let counter: Option<Counter> = result.take(0)?;
        counter
            .map(|c| c.value)
            .ok_or_else(|| RepoError::Database(format!("Sequence '{name}' allocation failed")))
    }
}

/// Parse a `"table:id"` string into a RecordId
pub fn parse_record_id(id: &str) -> RepoResult<surrealdb::RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

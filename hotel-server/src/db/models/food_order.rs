//! Food Order Model
//!
//! A food order carries two status fields: the kitchen works its own
//! pipeline and the reception view follows it. Only Delivered orders
//! are picked up by billing.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{KitchenStatus, ReceptionStatus};
use surrealdb::RecordId;

/// Food order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrder {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Sequential human-facing order number
    pub order_id: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    /// Ordered menu item references
    #[serde(with = "serde_helpers::vec_record_id")]
    pub items: Vec<RecordId>,
    pub reception_status: ReceptionStatus,
    pub kitchen_status: KitchenStatus,
    /// Requested delivery time, free-form
    pub time: String,
    /// Order total, summed from the menu prices at creation
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create food order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderCreate {
    pub room: String,
    pub items: Vec<String>,
    pub time: String,
}

/// Kitchen status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodOrderStatusUpdate {
    pub kitchen_status: KitchenStatus,
}

//! Billing Model
//!
//! An invoice snapshots the guest and room at generation time so later
//! edits to the directories never change an issued bill. Amounts are
//! recomputed from the live consumption records on every regeneration
//! until the bill is paid.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{PaymentMethod, PaymentStatus};
use surrealdb::RecordId;

/// Guest snapshot embedded in an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilledGuest {
    #[serde(with = "serde_helpers::record_id")]
    pub guest_id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Room and stay snapshot embedded in an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilledRoom {
    #[serde(with = "serde_helpers::record_id")]
    pub room_id: RecordId,
    pub room_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub room_type_id: RecordId,
    pub num_nights: i64,
    pub num_adults: i32,
    pub num_children: i32,
    pub extra_adults: i32,
    pub extra_children: i32,
    pub total_room_price: f64,
}

/// One billed consumption line (a food order or a service request)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilledLineItem {
    #[serde(with = "serde_helpers::record_id")]
    pub source: RecordId,
    /// Item or service names, for the printed bill
    pub items: Vec<String>,
    pub price: f64,
}

/// Billing entity (invoice)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Billing {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    pub guest: BilledGuest,
    pub room: BilledRoom,
    #[serde(default)]
    pub food_orders: Vec<BilledLineItem>,
    pub total_food_cost: f64,
    #[serde(default)]
    pub service_requests: Vec<BilledLineItem>,
    pub total_service_cost: f64,
    pub subtotal: f64,
    /// Tax amount, 5% of the subtotal
    pub taxes: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payment status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

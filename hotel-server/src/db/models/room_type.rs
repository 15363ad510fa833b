//! Room Type Model
//!
//! Immutable reference data consulted by the billing engine.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Included guest allowance per night
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuestAllowance {
    pub adults: i32,
    pub children: i32,
}

/// Nightly surcharge per guest beyond the allowance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtraGuestCost {
    pub adult: f64,
    pub child: f64,
}

/// Room type entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Type name, unique
    pub name: String,
    /// Nightly price
    pub price: f64,
    pub max_guests: GuestAllowance,
    pub extra_cost: ExtraGuestCost,
}

/// Create room type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeCreate {
    pub name: String,
    pub price: f64,
    pub max_guests: GuestAllowance,
    pub extra_cost: ExtraGuestCost,
}

/// Update room type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<GuestAllowance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_cost: Option<ExtraGuestCost>,
}

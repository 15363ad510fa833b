//! Room Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{CleaningState, RoomStatus};
use surrealdb::RecordId;

/// Room entity
///
/// Occupancy fields (`guest`, `check_out`, `booking`) are owned by the
/// booking lifecycle; cleaning/maintenance fields by housekeeping. The
/// two mutation paths never touch each other's fields.
///
/// Invariant: status Occupied ⇒ guest, booking and check_out are all
/// set; status Available ⇒ all three are cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Human-facing room number, unique
    pub number: String,
    /// Room type reference
    #[serde(rename = "type", with = "serde_helpers::record_id")]
    pub room_type: RecordId,
    /// Nightly price, copied from the room type at creation
    pub price: f64,
    pub status: RoomStatus,
    /// Name of the current occupant
    #[serde(default)]
    pub guest: Option<String>,
    /// Scheduled check-out of the current stay
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    /// Active booking reference
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub booking: Option<RecordId>,
    #[serde(default)]
    pub cleaning: Option<CleaningState>,
    #[serde(default)]
    pub last_cleaned: Option<DateTime<Utc>>,
    /// Open maintenance issue
    #[serde(default)]
    pub issue: Option<String>,
    /// Maintenance ETA, free-form
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create room payload — the price is derived from the room type,
/// never taken from the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    #[serde(default)]
    pub status: Option<RoomStatus>,
}

/// Update room payload (housekeeping / maintenance fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<Option<CleaningState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<Option<String>>,
}

//! Booking Model
//!
//! The booking is the root of the stay lifecycle. Its `booking_id` is a
//! sequential human-facing number starting at 1001, allocated from the
//! `counter` table.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{BookingExtra, BookingStatus};
use surrealdb::RecordId;

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Sequential human-facing booking number
    pub booking_id: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub guest: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    #[serde(default)]
    pub booking_date: Option<DateTime<Utc>>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub num_adults: i32,
    pub num_children: i32,
    #[serde(default)]
    pub extras: Vec<BookingExtra>,
    #[serde(default = "default_guest_comment")]
    pub guest_comment: String,
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_guest_comment() -> String {
    "No Request".to_string()
}

/// Create booking payload
///
/// `guest` and `room` arrive as `"table:id"` link strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub guest: String,
    pub room: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[serde(default = "default_adults")]
    pub num_adults: i32,
    #[serde(default)]
    pub num_children: i32,
    #[serde(default)]
    pub extras: Vec<BookingExtra>,
    #[serde(default)]
    pub guest_comment: Option<String>,
}

fn default_adults() -> i32 {
    1
}

/// Update booking payload (stay details only, never the status)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_adults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_children: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<BookingExtra>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_comment: Option<String>,
}

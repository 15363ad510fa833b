//! Service Request Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::ServiceRequestStatus;
use surrealdb::RecordId;

/// Service request entity
///
/// Only Completed requests are picked up by billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Sequential human-facing request number
    pub request_id: i64,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub booking: RecordId,
    /// Requested service references
    #[serde(with = "serde_helpers::vec_record_id")]
    pub services: Vec<RecordId>,
    #[serde(default)]
    pub status: ServiceRequestStatus,
    /// Request total, summed from the service prices at creation
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create service request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestCreate {
    pub room: String,
    pub services: Vec<String>,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestStatusUpdate {
    pub status: ServiceRequestStatus,
}

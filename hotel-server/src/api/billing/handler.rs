//! Billing API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::billing::BillingEngine;
use crate::core::ServerState;
use crate::db::models::{Billing, PaymentUpdate};
use crate::utils::{ok, ok_with_message, AppResponse, AppResult};

/// GET /api/billing
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Billing>>>> {
    let engine = BillingEngine::new(state.db.clone());
    Ok(ok(engine.get_all().await?))
}

/// POST /api/billing/{booking_id}
///
/// Generates the invoice for a booking; 201 when newly created, 200
/// when an unpaid invoice was recomputed.
pub async fn generate(
    State(state): State<ServerState>,
    Path(booking_id): Path<String>,
) -> AppResult<(StatusCode, Json<AppResponse<Billing>>)> {
    let engine = BillingEngine::new(state.db.clone());
    let (bill, created) = engine.generate(&booking_id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let message = if created {
        "Bill generated"
    } else {
        "Bill recomputed"
    };
    Ok((status, ok_with_message(bill, message)))
}

/// GET /api/billing/{booking_id}
pub async fn get_for_booking(
    State(state): State<ServerState>,
    Path(booking_id): Path<String>,
) -> AppResult<Json<AppResponse<Billing>>> {
    let engine = BillingEngine::new(state.db.clone());
    Ok(ok(engine.get_for_booking(&booking_id).await?))
}

/// PATCH /api/billing/{bill_id}/payment
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(bill_id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<AppResponse<Billing>>> {
    let engine = BillingEngine::new(state.db.clone());
    Ok(ok(engine.update_payment(&bill_id, payload).await?))
}

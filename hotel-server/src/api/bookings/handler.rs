//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::BookingStatus;

use crate::api::pagination::{PageQuery, Paginated};
use crate::booking::BookingManager;
use crate::core::ServerState;
use crate::db::models::{Booking, BookingCreate, BookingUpdate};
use crate::utils::{ok, ok_with_message, AppResponse, AppResult};

/// Query parameters for the booking list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<BookingStatus>,
}

/// GET /api/bookings?page=&limit=&status= - newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Paginated<Booking>>>> {
    let manager = BookingManager::new(state.db.clone());
    let paging = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, per_page) = (paging.page(), paging.per_page());
    let (bookings, total) = manager.find_page(page, per_page, query.status).await?;
    Ok(ok(Paginated::new(bookings, total, page, per_page)))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let manager = BookingManager::new(state.db.clone());
    Ok(ok(manager.get(&id).await?))
}

/// POST /api/bookings - create and check in, 201 on success
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Booking>>)> {
    let manager = BookingManager::new(state.db.clone());
    let booking = manager.create(payload).await?;
    Ok((StatusCode::CREATED, ok_with_message(booking, "Booking created")))
}

/// PUT /api/bookings/{id} - stay details only
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let manager = BookingManager::new(state.db.clone());
    Ok(ok(manager.update(&id, payload).await?))
}

/// PATCH /api/bookings/{id}/checkout
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Booking>>> {
    let manager = BookingManager::new(state.db.clone());
    let booking = manager.check_out(&id).await?;
    Ok(ok_with_message(booking, "Checked out"))
}

/// DELETE /api/bookings/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let manager = BookingManager::new(state.db.clone());
    Ok(ok(manager.delete(&id).await?))
}

//! Food Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::billing::charges;
use crate::core::ServerState;
use crate::db::models::{FoodOrder, FoodOrderCreate, FoodOrderStatusUpdate};
use crate::db::repository::{parse_record_id, FoodOrderRepository, MenuItemRepository, RoomRepository};
use crate::utils::{ok, ok_with_message, AppError, AppResponse, AppResult};

/// GET /api/food-orders
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<FoodOrder>>>> {
    let repo = FoodOrderRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/food-orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<FoodOrder>>> {
    let repo = FoodOrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food order {} not found", id)))?;
    Ok(ok(order))
}

/// POST /api/food-orders
///
/// The booking is derived from the room's active stay, and the price
/// is summed from the current menu. Neither is accepted from the
/// caller.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodOrderCreate>,
) -> AppResult<Json<AppResponse<FoodOrder>>> {
    if payload.items.is_empty() {
        return Err(AppError::Validation(
            "At least one item is required".to_string(),
        ));
    }

    let rooms = RoomRepository::new(state.db.clone());
    let room = rooms
        .find_by_id(&payload.room)
        .await?
        .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
    let booking = room.booking.clone().ok_or_else(|| {
        AppError::BusinessRule("Room has no active booking".to_string())
    })?;
    let room_id = room
        .id
        .ok_or_else(|| AppError::Internal("Room record without id".to_string()))?;

    let item_refs = payload
        .items
        .iter()
        .map(|item| parse_record_id(item))
        .collect::<Result<Vec<_>, _>>()?;

    let menu = MenuItemRepository::new(state.db.clone());
    let items = menu.resolve_all(&item_refs).await?;
    let price = charges::sum_charges(items.iter().map(|i| &i.price));

    let repo = FoodOrderRepository::new(state.db.clone());
    let now = Utc::now();
    let order = repo
        .create(FoodOrder {
            id: None,
            order_id: repo.next_order_id().await?,
            room: room_id,
            booking,
            items: item_refs,
            reception_status: Default::default(),
            kitchen_status: Default::default(),
            time: payload.time,
            price: charges::rounded(price),
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    Ok(ok_with_message(order, "Order placed"))
}

/// PATCH /api/food-orders/{id}/status
///
/// The kitchen drives the pipeline; the reception view follows.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FoodOrderStatusUpdate>,
) -> AppResult<Json<AppResponse<FoodOrder>>> {
    let repo = FoodOrderRepository::new(state.db.clone());
    let order_id = parse_record_id(&id)?;
    Ok(ok(repo
        .set_kitchen_status(&order_id, payload.kitchen_status)
        .await?))
}

/// DELETE /api/food-orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = FoodOrderRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

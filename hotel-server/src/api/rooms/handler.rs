//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::RoomStatus;

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::db::repository::{RoomRepository, RoomTypeRepository};
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Room>>>> {
    let repo = RoomRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Room>>> {
    let repo = RoomRepository::new(state.db.clone());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))?;
    Ok(ok(room))
}

/// POST /api/rooms
///
/// The nightly price is copied from the referenced room type.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<AppResponse<Room>>> {
    let room_types = RoomTypeRepository::new(state.db.clone());
    let room_type = room_types
        .find_by_id(&payload.room_type)
        .await?
        .ok_or_else(|| AppError::NotFound("Room type not found".to_string()))?;
    let room_type_id = room_type
        .id
        .ok_or_else(|| AppError::Internal("Room type record without id".to_string()))?;

    let repo = RoomRepository::new(state.db.clone());
    let room = repo
        .create(
            payload.number,
            room_type_id,
            room_type.price,
            payload.status.unwrap_or(RoomStatus::Available),
        )
        .await?;
    Ok(ok(room))
}

/// PUT /api/rooms/{id} - housekeeping and maintenance fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<AppResponse<Room>>> {
    let repo = RoomRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/rooms/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = RoomRepository::new(state.db.clone());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))?;
    if room.status == RoomStatus::Occupied {
        return Err(AppError::Conflict(
            "Occupied rooms cannot be deleted".to_string(),
        ));
    }
    Ok(ok(repo.delete(&id).await?))
}

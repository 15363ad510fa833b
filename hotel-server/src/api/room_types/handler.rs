//! Room Type API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use crate::db::repository::RoomTypeRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/room-types
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<RoomType>>>> {
    let repo = RoomTypeRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/room-types/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<RoomType>>> {
    let repo = RoomTypeRepository::new(state.db.clone());
    let room_type = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room type {} not found", id)))?;
    Ok(ok(room_type))
}

/// POST /api/room-types
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomTypeCreate>,
) -> AppResult<Json<AppResponse<RoomType>>> {
    let repo = RoomTypeRepository::new(state.db.clone());
    Ok(ok(repo.create(payload).await?))
}

/// PUT /api/room-types/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomTypeUpdate>,
) -> AppResult<Json<AppResponse<RoomType>>> {
    let repo = RoomTypeRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/room-types/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = RoomTypeRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

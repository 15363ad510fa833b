//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use crate::db::repository::InventoryItemRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

/// GET /api/inventory
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<InventoryItem>>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/inventory/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Inventory item {} not found", id)))?;
    Ok(ok(item))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    if payload.stock < 0 || payload.min_required < 0 {
        return Err(AppError::Validation(
            "Stock levels cannot be negative".to_string(),
        ));
    }
    let repo = InventoryItemRepository::new(state.db.clone());
    Ok(ok(repo.create(payload).await?))
}

/// PUT /api/inventory/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<AppResponse<InventoryItem>>> {
    if payload.stock.is_some_and(|s| s < 0) || payload.min_required.is_some_and(|m| m < 0) {
        return Err(AppError::Validation(
            "Stock levels cannot be negative".to_string(),
        ));
    }
    let repo = InventoryItemRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/inventory/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = InventoryItemRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

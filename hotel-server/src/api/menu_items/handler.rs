//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

fn validate_price(price: f64) -> AppResult<()> {
    if !(0.0..=10_000.0).contains(&price) {
        return Err(AppError::Validation(
            "Price must be between 0 and 10000".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))?;
    Ok(ok(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    validate_price(payload.price)?;
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(ok(repo.create(payload).await?))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

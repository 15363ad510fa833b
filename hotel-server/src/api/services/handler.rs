//! Service Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Service, ServiceCreate, ServiceUpdate};
use crate::db::repository::ServiceRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

fn validate_price(price: f64) -> AppResult<()> {
    if !(0.0..=10_000.0).contains(&price) {
        return Err(AppError::Validation(
            "Price must be between 0 and 10000".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/services
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Service>>>> {
    let repo = ServiceRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/services/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Service>>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
    Ok(ok(service))
}

/// POST /api/services
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<AppResponse<Service>>> {
    validate_price(payload.price)?;
    let repo = ServiceRepository::new(state.db.clone());
    Ok(ok(repo.create(payload).await?))
}

/// PUT /api/services/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<AppResponse<Service>>> {
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    let repo = ServiceRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/services/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ServiceRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

//! Guest API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::GuestStatus;

use crate::core::ServerState;
use crate::db::models::{Guest, GuestCreate, GuestUpdate};
use crate::db::repository::GuestRepository;
use crate::utils::{ok, AppError, AppResponse, AppResult};

fn validate_email(email: &str) -> AppResult<()> {
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> AppResult<()> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must be exactly 10 digits".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/guests
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<Guest>>>> {
    let repo = GuestRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/guests/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Guest>>> {
    let repo = GuestRepository::new(state.db.clone());
    let guest = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Guest {} not found", id)))?;
    Ok(ok(guest))
}

/// POST /api/guests
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestCreate>,
) -> AppResult<Json<AppResponse<Guest>>> {
    validate_email(&payload.email)?;
    validate_phone(&payload.phone)?;
    let repo = GuestRepository::new(state.db.clone());
    Ok(ok(repo.create(payload).await?))
}

/// PUT /api/guests/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<GuestUpdate>,
) -> AppResult<Json<AppResponse<Guest>>> {
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    if let Some(phone) = &payload.phone {
        validate_phone(phone)?;
    }

    let repo = GuestRepository::new(state.db.clone());
    Ok(ok(repo.update(&id, payload).await?))
}

/// DELETE /api/guests/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = GuestRepository::new(state.db.clone());
    let guest = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Guest {} not found", id)))?;
    if guest.status == GuestStatus::Current {
        return Err(AppError::Conflict(
            "Guests with an active stay cannot be deleted".to_string(),
        ));
    }
    Ok(ok(repo.delete(&id).await?))
}

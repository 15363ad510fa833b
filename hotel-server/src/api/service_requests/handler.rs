//! Service Request API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::billing::charges;
use crate::core::ServerState;
use crate::db::models::{ServiceRequest, ServiceRequestCreate, ServiceRequestStatusUpdate};
use crate::db::repository::{
    parse_record_id, RoomRepository, ServiceRepository, ServiceRequestRepository,
};
use crate::utils::{ok, ok_with_message, AppError, AppResponse, AppResult};

/// GET /api/service-requests
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<ServiceRequest>>>> {
    let repo = ServiceRequestRepository::new(state.db.clone());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/service-requests/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<ServiceRequest>>> {
    let repo = ServiceRequestRepository::new(state.db.clone());
    let request = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service request {} not found", id)))?;
    Ok(ok(request))
}

/// POST /api/service-requests
///
/// The booking is derived from the room's active stay, and the price
/// is summed from the service catalog.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ServiceRequestCreate>,
) -> AppResult<Json<AppResponse<ServiceRequest>>> {
    if payload.services.is_empty() {
        return Err(AppError::Validation(
            "At least one service is required".to_string(),
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

    let service_refs = payload
        .services
        .iter()
        .map(|service| parse_record_id(service))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = ServiceRepository::new(state.db.clone());
    let services = catalog.resolve_all(&service_refs).await?;
    let price = charges::sum_charges(services.iter().map(|s| &s.price));

    let repo = ServiceRequestRepository::new(state.db.clone());
    let now = Utc::now();
    let request = repo
        .create(ServiceRequest {
            id: None,
            request_id: repo.next_request_id().await?,
            room: room_id,
            booking,
            services: service_refs,
            status: Default::default(),
            price: charges::rounded(price),
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    Ok(ok_with_message(request, "Service request placed"))
}

/// PATCH /api/service-requests/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ServiceRequestStatusUpdate>,
) -> AppResult<Json<AppResponse<ServiceRequest>>> {
    let repo = ServiceRequestRepository::new(state.db.clone());
    let request_id = parse_record_id(&id)?;
    Ok(ok(repo.set_status(&request_id, payload.status).await?))
}

/// DELETE /api/service-requests/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let repo = ServiceRequestRepository::new(state.db.clone());
    Ok(ok(repo.delete(&id).await?))
}

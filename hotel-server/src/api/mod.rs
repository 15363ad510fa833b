//! HTTP API Module
//!
//! One submodule per resource, each exposing a `router()`. The
//! assembled application carries CORS, compression, tracing and
//! request-id middleware.

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod billing;
pub mod bookings;
pub mod food_orders;
pub mod guests;
pub mod health;
pub mod inventory;
pub mod menu_items;
pub mod pagination;
pub mod rooms;
pub mod router_ext;
pub mod room_types;
pub mod service_requests;
pub mod services;

pub use pagination::{PageQuery, Paginated};
pub use router_ext::{OneshotResult, OneshotRouter};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Stay lifecycle
        .merge(bookings::router())
        .merge(billing::router())
        // Directories
        .merge(rooms::router())
        .merge(room_types::router())
        .merge(guests::router())
        // In-stay consumption
        .merge(food_orders::router())
        .merge(service_requests::router())
        // Catalogs
        .merge(inventory::router())
        .merge(menu_items::router())
        .merge(services::router())
        // Health - public route
        .merge(health::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(_state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Method, Request, StatusCode};
    use serde_json::{json, Value};

    async fn call(
        state: &ServerState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut router = build_router();
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = router.oneshot(state, request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let state = ServerState::in_memory().await;
        let (status, body) = call(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_full_stay_over_http() {
        let state = ServerState::in_memory().await;

        // Reference data
        let (status, body) = call(
            &state,
            Method::POST,
            "/api/room-types",
            Some(json!({
                "name": "Deluxe",
                "price": 200.0,
                "max_guests": {"adults": 2, "children": 1},
                "extra_cost": {"adult": 10.0, "child": 5.0}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let room_type_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &state,
            Method::POST,
            "/api/rooms",
            Some(json!({"number": "101", "type": room_type_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["price"], 200.0);
        let room_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &state,
            Method::POST,
            "/api/guests",
            Some(json!({
                "name": "Asha Rao",
                "email": "asha@example.com",
                "phone": "9876543210"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["status"], "New Guest");
        let guest_id = body["data"]["id"].as_str().unwrap().to_string();

        // Booking checks the guest in
        let (status, body) = call(
            &state,
            Method::POST,
            "/api/bookings",
            Some(json!({
                "guest": guest_id,
                "room": room_id,
                "check_in": "2025-03-10T14:00:00Z",
                "check_out": "2025-03-12T14:00:00Z",
                "num_adults": 3,
                "num_children": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["booking_id"], 1001);
        assert_eq!(body["data"]["booking_status"], "CheckedIn");
        let booking_id = body["data"]["id"].as_str().unwrap().to_string();

        let (_, body) = call(&state, Method::GET, &format!("/api/rooms/{room_id}"), None).await;
        assert_eq!(body["data"]["status"], "Occupied");
        assert_eq!(body["data"]["guest"], "Asha Rao");

        // Check-out is blocked until the bill is paid
        let (status, _) = call(
            &state,
            Method::PATCH,
            &format!("/api/bookings/{booking_id}/checkout"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Generate (201), regenerate (200)
        let (status, body) = call(
            &state,
            Method::POST,
            &format!("/api/billing/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["subtotal"], 420.0);
        assert_eq!(body["data"]["taxes"], 21.0);
        assert_eq!(body["data"]["total_amount"], 441.0);
        let bill_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &state,
            Method::POST,
            &format!("/api/billing/{booking_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Pay, then check out
        let (status, body) = call(
            &state,
            Method::PATCH,
            &format!("/api/billing/{bill_id}/payment"),
            Some(json!({"payment_status": "paid", "payment_method": "upi"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["payment_status"], "paid");

        let (status, body) = call(
            &state,
            Method::PATCH,
            &format!("/api/bookings/{booking_id}/checkout"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["booking_status"], "CheckedOut");

        let (_, body) = call(&state, Method::GET, &format!("/api/rooms/{room_id}"), None).await;
        assert_eq!(body["data"]["status"], "Available");
        assert_eq!(body["data"]["cleaning"], "In Progress");

        let (_, body) = call(&state, Method::GET, &format!("/api/guests/{guest_id}"), None).await;
        assert_eq!(body["data"]["status"], "Past Guest");
    }

    #[tokio::test]
    async fn test_booking_list_pagination_envelope() {
        let state = ServerState::in_memory().await;
        let (status, body) = call(&state, Method::GET, "/api/bookings?page=1&limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["results"].is_array());
        assert_eq!(body["data"]["totalPages"], 1);
        assert_eq!(body["data"]["currentPage"], 1);

        // The status filter narrows the page
        let (status, body) = call(
            &state,
            Method::GET,
            "/api/bookings?status=CheckedOut",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_booking_is_404_with_code() {
        let state = ServerState::in_memory().await;
        let (status, body) = call(&state, Method::GET, "/api/bookings/booking:missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "E0003");
    }
}

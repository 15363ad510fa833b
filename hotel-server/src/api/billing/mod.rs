//! Billing API module

mod handler;

use axum::{Router, routing::get, routing::patch, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/billing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            post(handler::generate).get(handler::get_for_booking),
        )
        .route("/{id}/payment", patch(handler::update_payment))
}

use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::features::transport::handlers::{self, TransportState};
use crate::features::transport::service::TransportService;

/// Create routes for the transport feature
pub fn routes(transport_service: Arc<TransportService>) -> Router {
    let state = TransportState { transport_service };

    Router::new()
        .route("/api/transport/routes", post(handlers::create_route))
        .route("/api/transport/routes", get(handlers::list_routes))
        .route("/api/transport/routes/{id}", get(handlers::get_route))
        .route("/api/transport/routes/{id}", patch(handlers::update_route))
        .route(
            "/api/transport/routes/{id}/vehicles/{code}",
            put(handlers::sync_vehicle),
        )
        .route(
            "/api/transport/routes/{id}/vehicles",
            get(handlers::list_vehicles),
        )
        .route("/api/transport/routes/{id}/eta", get(handlers::get_eta))
        .route(
            "/api/transport/announcements",
            post(handlers::create_announcement),
        )
        .route(
            "/api/transport/announcements",
            get(handlers::list_announcements),
        )
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::diversions::handlers::{self, DiversionState};
use crate::features::diversions::service::DiversionService;

/// Create routes for the diversions feature
pub fn routes(diversion_service: Arc<DiversionService>) -> Router {
    let state = DiversionState { diversion_service };

    Router::new()
        .route("/api/diversions/notices", post(handlers::create_notice))
        .route("/api/diversions/notices", get(handlers::list_notices))
        .route("/api/diversions/notices/{id}", get(handlers::get_notice))
        .route(
            "/api/diversions/notices/{id}",
            patch(handlers::update_notice),
        )
        .route(
            "/api/diversions/notices/{id}",
            delete(handlers::delete_notice),
        )
        .route("/api/diversions/routes", post(handlers::create_route))
        .route("/api/diversions/routes", get(handlers::list_routes))
        .route("/api/diversions/routes/{id}", patch(handlers::update_route))
        .route(
            "/api/diversions/routes/{id}",
            delete(handlers::delete_route),
        )
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::road_updates::handlers::{self, RoadUpdateState};
use crate::features::road_updates::service::RoadUpdateService;

/// Create routes for the road updates feature
pub fn routes(road_update_service: Arc<RoadUpdateService>) -> Router {
    let state = RoadUpdateState {
        road_update_service,
    };

    Router::new()
        .route("/api/road-updates", post(handlers::create_road_update))
        .route("/api/road-updates", get(handlers::list_road_updates))
        .route("/api/road-updates/{id}", get(handlers::get_road_update))
        .route("/api/road-updates/{id}", patch(handlers::update_road_update))
        .route(
            "/api/road-updates/{id}",
            delete(handlers::delete_road_update),
        )
        .with_state(state)
}

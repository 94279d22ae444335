use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::features::signals::handlers::{self, SignalState};
use crate::features::signals::service::SignalService;

/// Create routes for the signals feature
pub fn routes(signal_service: Arc<SignalService>) -> Router {
    let state = SignalState { signal_service };

    Router::new()
        .route("/api/signals", post(handlers::create_signal))
        .route("/api/signals", get(handlers::list_signals))
        .route("/api/signals/{id}", get(handlers::get_signal))
        .route("/api/signals/{id}", delete(handlers::delete_signal))
        .route(
            "/api/signals/{id}/status",
            patch(handlers::update_signal_status),
        )
        .route("/api/signals/{id}/timing", put(handlers::set_timing))
        .route("/api/signals/{id}/timing", get(handlers::get_timing))
        .route("/api/signals/{id}/schedules", post(handlers::add_schedule))
        .route("/api/signals/{id}/schedules", get(handlers::list_schedules))
        .route("/api/signals/{id}/logs", get(handlers::get_logs))
        .with_state(state)
}

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::permits::handlers::{self, PermitState};
use crate::features::permits::service::PermitService;
use crate::features::workflow::WorkflowService;

/// Create routes for the permits feature
pub fn routes(
    permit_service: Arc<PermitService>,
    workflow_service: Arc<WorkflowService>,
) -> Router {
    let state = PermitState {
        permit_service,
        workflow_service,
    };

    Router::new()
        .route("/api/permits", post(handlers::create_permit))
        .route("/api/permits", get(handlers::list_permits))
        .route("/api/permits/{id}", get(handlers::get_permit))
        .route(
            "/api/permits/{id}/status",
            patch(handlers::update_permit_status),
        )
        .route("/api/permits/{id}/history", get(handlers::get_permit_history))
        .with_state(state)
}

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers::{self, DashboardState};
use crate::features::dashboard::service::DashboardService;

/// Create routes for the dashboard feature
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    let state = DashboardState { dashboard_service };

    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .with_state(state)
}

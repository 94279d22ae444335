use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::service::ReportService;
use crate::features::workflow::WorkflowService;

/// Create routes for the reports feature
///
/// All routes require the session gate to be applied by the caller.
pub fn routes(
    report_service: Arc<ReportService>,
    workflow_service: Arc<WorkflowService>,
) -> Router {
    let state = ReportState {
        report_service,
        workflow_service,
    };

    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route("/api/reports/{id}", delete(handlers::delete_report))
        .route(
            "/api/reports/{id}/status",
            patch(handlers::update_report_status),
        )
        .route("/api/reports/{id}/history", get(handlers::get_report_history))
        .route(
            "/api/reports/{id}/attachments",
            post(handlers::upload_attachment).get(handlers::list_attachments),
        )
        .with_state(state)
}

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::dashboard::service::DashboardService;
use crate::shared::types::ApiResponse;

/// State for dashboard handlers
#[derive(Clone)]
pub struct DashboardState {
    pub dashboard_service: Arc<DashboardService>,
}

/// Aggregate counts for the back-office overview
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Counts by status per entity", body = ApiResponse<DashboardSummaryDto>)
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_summary(
    _user: AuthenticatedUser,
    State(state): State<DashboardState>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    let summary = state.dashboard_service.summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::permits::dtos::{
    CreatePermitDto, ListPermitsQuery, PermitResponseDto, UpdatePermitStatusDto,
};
use crate::features::permits::service::PermitService;
use crate::features::workflow::dtos::StatusHistoryDto;
use crate::features::workflow::models::EntityKind;
use crate::features::workflow::WorkflowService;
use crate::shared::types::{ApiResponse, Meta};

/// State for permit handlers
#[derive(Clone)]
pub struct PermitState {
    pub permit_service: Arc<PermitService>,
    pub workflow_service: Arc<WorkflowService>,
}

/// File a permit application
#[utoipa::path(
    post,
    path = "/api/permits",
    request_body = CreatePermitDto,
    responses(
        (status = 200, description = "Permit filed", body = ApiResponse<PermitResponseDto>),
        (status = 400, description = "Validation error (including inverted date range)"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "permits"
)]
pub async fn create_permit(
    user: AuthenticatedUser,
    State(state): State<PermitState>,
    AppJson(dto): AppJson<CreatePermitDto>,
) -> Result<Json<ApiResponse<PermitResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let permit = state.permit_service.create(&user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(permit.into()),
        Some("Permit application filed".to_string()),
        None,
    )))
}

/// List permits with an optional status filter
#[utoipa::path(
    get,
    path = "/api/permits",
    params(ListPermitsQuery),
    responses(
        (status = 200, description = "List of permits", body = ApiResponse<Vec<PermitResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "permits"
)]
pub async fn list_permits(
    _user: AuthenticatedUser,
    State(state): State<PermitState>,
    Query(query): Query<ListPermitsQuery>,
) -> Result<Json<ApiResponse<Vec<PermitResponseDto>>>> {
    let (permits, total) = state.permit_service.list(&query).await?;
    let dtos: Vec<PermitResponseDto> = permits.into_iter().map(|p| p.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get permit by ID
#[utoipa::path(
    get,
    path = "/api/permits/{id}",
    params(("id" = Uuid, Path, description = "Permit ID")),
    responses(
        (status = 200, description = "Permit found", body = ApiResponse<PermitResponseDto>),
        (status = 404, description = "Permit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "permits"
)]
pub async fn get_permit(
    _user: AuthenticatedUser,
    State(state): State<PermitState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PermitResponseDto>>> {
    let permit = state.permit_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(permit.into()), None, None)))
}

/// Decide a permit (approve/reject/reset to pending)
#[utoipa::path(
    patch,
    path = "/api/permits/{id}/status",
    params(("id" = Uuid, Path, description = "Permit ID")),
    request_body = UpdatePermitStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<PermitResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Permit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "permits"
)]
pub async fn update_permit_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<PermitState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdatePermitStatusDto>,
) -> Result<Json<ApiResponse<PermitResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let permit = state
        .workflow_service
        .transition_permit(id, dto.status, &admin.user_id, dto.reason.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(permit.into()),
        Some("Permit status updated".to_string()),
        None,
    )))
}

/// Get the status trail of a permit
#[utoipa::path(
    get,
    path = "/api/permits/{id}/history",
    params(("id" = Uuid, Path, description = "Permit ID")),
    responses(
        (status = 200, description = "Status history, newest first", body = ApiResponse<Vec<StatusHistoryDto>>),
        (status = 404, description = "Permit not found")
    ),
    security(("bearer_auth" = [])),
    tag = "permits"
)]
pub async fn get_permit_history(
    _user: AuthenticatedUser,
    State(state): State<PermitState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<StatusHistoryDto>>>> {
    state.permit_service.get(id).await?;

    let entries = state
        .workflow_service
        .history(EntityKind::Permit, id)
        .await?;
    let dtos: Vec<StatusHistoryDto> = entries.into_iter().map(|e| e.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

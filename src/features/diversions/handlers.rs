use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireOperator;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::diversions::dtos::{
    CreateNoticeDto, CreateRouteDto, ListNoticesQuery, NoticeResponseDto, RouteResponseDto,
    UpdateNoticeDto, UpdateRouteDto,
};
use crate::features::diversions::service::DiversionService;
use crate::shared::types::{ApiResponse, Meta};

/// State for diversion handlers
#[derive(Clone)]
pub struct DiversionState {
    pub diversion_service: Arc<DiversionService>,
}

/// Post a diversion notice
#[utoipa::path(
    post,
    path = "/api/diversions/notices",
    request_body = CreateNoticeDto,
    responses(
        (status = 200, description = "Notice posted", body = ApiResponse<NoticeResponseDto>),
        (status = 400, description = "Validation error (including inverted window)"),
        (status = 403, description = "Operator access required")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn create_notice(
    RequireOperator(operator): RequireOperator,
    State(state): State<DiversionState>,
    AppJson(dto): AppJson<CreateNoticeDto>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notice = state
        .diversion_service
        .create_notice(&operator.user_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(NoticeResponseDto::from_model(notice, Utc::now())),
        Some("Diversion notice posted".to_string()),
        None,
    )))
}

/// List diversion notices with their derived display state
#[utoipa::path(
    get,
    path = "/api/diversions/notices",
    params(ListNoticesQuery),
    responses(
        (status = 200, description = "List of notices", body = ApiResponse<Vec<NoticeResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn list_notices(
    _user: AuthenticatedUser,
    State(state): State<DiversionState>,
    Query(query): Query<ListNoticesQuery>,
) -> Result<Json<ApiResponse<Vec<NoticeResponseDto>>>> {
    let notices = state.diversion_service.list_notices(&query).await?;
    let now = Utc::now();
    let total = notices.len() as i64;
    let dtos: Vec<NoticeResponseDto> = notices
        .into_iter()
        .map(|n| NoticeResponseDto::from_model(n, now))
        .collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a diversion notice by ID
#[utoipa::path(
    get,
    path = "/api/diversions/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice found", body = ApiResponse<NoticeResponseDto>),
        (status = 404, description = "Notice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn get_notice(
    _user: AuthenticatedUser,
    State(state): State<DiversionState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    let notice = state.diversion_service.get_notice(id).await?;
    Ok(Json(ApiResponse::success(
        Some(NoticeResponseDto::from_model(notice, Utc::now())),
        None,
        None,
    )))
}

/// Update a diversion notice
#[utoipa::path(
    patch,
    path = "/api/diversions/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = ApiResponse<NoticeResponseDto>),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Notice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn update_notice(
    RequireOperator(_operator): RequireOperator,
    State(state): State<DiversionState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateNoticeDto>,
) -> Result<Json<ApiResponse<NoticeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notice = state.diversion_service.update_notice(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(NoticeResponseDto::from_model(notice, Utc::now())),
        Some("Diversion notice updated".to_string()),
        None,
    )))
}

/// Delete a diversion notice
#[utoipa::path(
    delete,
    path = "/api/diversions/notices/{id}",
    params(("id" = Uuid, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice deleted"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Notice not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn delete_notice(
    RequireOperator(_operator): RequireOperator,
    State(state): State<DiversionState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.diversion_service.delete_notice(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Diversion notice deleted".to_string()),
        None,
    )))
}

/// Register a named city route
#[utoipa::path(
    post,
    path = "/api/diversions/routes",
    request_body = CreateRouteDto,
    responses(
        (status = 200, description = "Route created", body = ApiResponse<RouteResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn create_route(
    RequireOperator(_operator): RequireOperator,
    State(state): State<DiversionState>,
    AppJson(dto): AppJson<CreateRouteDto>,
) -> Result<Json<ApiResponse<RouteResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let route = state.diversion_service.create_route(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(route.into()),
        Some("Route created".to_string()),
        None,
    )))
}

/// List named city routes
#[utoipa::path(
    get,
    path = "/api/diversions/routes",
    responses(
        (status = 200, description = "List of routes", body = ApiResponse<Vec<RouteResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn list_routes(
    _user: AuthenticatedUser,
    State(state): State<DiversionState>,
) -> Result<Json<ApiResponse<Vec<RouteResponseDto>>>> {
    let routes = state.diversion_service.list_routes().await?;
    let total = routes.len() as i64;
    let dtos: Vec<RouteResponseDto> = routes.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Update a named city route
#[utoipa::path(
    patch,
    path = "/api/diversions/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateRouteDto,
    responses(
        (status = 200, description = "Route updated", body = ApiResponse<RouteResponseDto>),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn update_route(
    RequireOperator(_operator): RequireOperator,
    State(state): State<DiversionState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRouteDto>,
) -> Result<Json<ApiResponse<RouteResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let route = state.diversion_service.update_route(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(route.into()),
        Some("Route updated".to_string()),
        None,
    )))
}

/// Delete a named city route
#[utoipa::path(
    delete,
    path = "/api/diversions/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route deleted"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "diversions"
)]
pub async fn delete_route(
    RequireOperator(_operator): RequireOperator,
    State(state): State<DiversionState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.diversion_service.delete_route(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Route deleted".to_string()),
        None,
    )))
}

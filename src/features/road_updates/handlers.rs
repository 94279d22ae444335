use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireOperator;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::road_updates::dtos::{
    CreateRoadUpdateDto, ListRoadUpdatesQuery, RoadUpdateResponseDto, UpdateRoadUpdateDto,
};
use crate::features::road_updates::service::RoadUpdateService;
use crate::shared::types::{ApiResponse, Meta};

/// State for road update handlers
#[derive(Clone)]
pub struct RoadUpdateState {
    pub road_update_service: Arc<RoadUpdateService>,
}

/// Post a road update
#[utoipa::path(
    post,
    path = "/api/road-updates",
    request_body = CreateRoadUpdateDto,
    responses(
        (status = 200, description = "Road update posted", body = ApiResponse<RoadUpdateResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required")
    ),
    security(("bearer_auth" = [])),
    tag = "road-updates"
)]
pub async fn create_road_update(
    RequireOperator(operator): RequireOperator,
    State(state): State<RoadUpdateState>,
    AppJson(dto): AppJson<CreateRoadUpdateDto>,
) -> Result<Json<ApiResponse<RoadUpdateResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let update = state
        .road_update_service
        .create(&operator.user_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(update.into()),
        Some("Road update posted".to_string()),
        None,
    )))
}

/// List road updates with optional status/kind filters
#[utoipa::path(
    get,
    path = "/api/road-updates",
    params(ListRoadUpdatesQuery),
    responses(
        (status = 200, description = "List of road updates", body = ApiResponse<Vec<RoadUpdateResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "road-updates"
)]
pub async fn list_road_updates(
    _user: AuthenticatedUser,
    State(state): State<RoadUpdateState>,
    Query(query): Query<ListRoadUpdatesQuery>,
) -> Result<Json<ApiResponse<Vec<RoadUpdateResponseDto>>>> {
    let updates = state.road_update_service.list(&query).await?;
    let total = updates.len() as i64;
    let dtos: Vec<RoadUpdateResponseDto> = updates.into_iter().map(|u| u.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a road update by ID
#[utoipa::path(
    get,
    path = "/api/road-updates/{id}",
    params(("id" = Uuid, Path, description = "Road update ID")),
    responses(
        (status = 200, description = "Road update found", body = ApiResponse<RoadUpdateResponseDto>),
        (status = 404, description = "Road update not found")
    ),
    security(("bearer_auth" = [])),
    tag = "road-updates"
)]
pub async fn get_road_update(
    _user: AuthenticatedUser,
    State(state): State<RoadUpdateState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RoadUpdateResponseDto>>> {
    let update = state.road_update_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(update.into()), None, None)))
}

/// Overwrite a road update in place, status included
#[utoipa::path(
    patch,
    path = "/api/road-updates/{id}",
    params(("id" = Uuid, Path, description = "Road update ID")),
    request_body = UpdateRoadUpdateDto,
    responses(
        (status = 200, description = "Road update overwritten", body = ApiResponse<RoadUpdateResponseDto>),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Road update not found")
    ),
    security(("bearer_auth" = [])),
    tag = "road-updates"
)]
pub async fn update_road_update(
    RequireOperator(_operator): RequireOperator,
    State(state): State<RoadUpdateState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRoadUpdateDto>,
) -> Result<Json<ApiResponse<RoadUpdateResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let update = state.road_update_service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(update.into()),
        Some("Road update updated".to_string()),
        None,
    )))
}

/// Delete a road update
#[utoipa::path(
    delete,
    path = "/api/road-updates/{id}",
    params(("id" = Uuid, Path, description = "Road update ID")),
    responses(
        (status = 200, description = "Road update deleted"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Road update not found")
    ),
    security(("bearer_auth" = [])),
    tag = "road-updates"
)]
pub async fn delete_road_update(
    RequireOperator(_operator): RequireOperator,
    State(state): State<RoadUpdateState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.road_update_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Road update deleted".to_string()),
        None,
    )))
}

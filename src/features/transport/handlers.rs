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
use crate::features::transport::dtos::{
    validate_vehicle_code, AnnouncementResponseDto, CreateAnnouncementDto,
    CreateTransportRouteDto, EtaQuery, EtaResponseDto, ListAnnouncementsQuery,
    ListTransportRoutesQuery, SyncVehicleDto, TransportRouteResponseDto,
    UpdateTransportRouteDto, VehicleLocationResponseDto,
};
use crate::features::transport::eta::estimate_minutes;
use crate::features::transport::service::TransportService;
use crate::shared::types::{ApiResponse, Meta};

/// State for transport handlers
#[derive(Clone)]
pub struct TransportState {
    pub transport_service: Arc<TransportService>,
}

/// Register a public transport route
#[utoipa::path(
    post,
    path = "/api/transport/routes",
    request_body = CreateTransportRouteDto,
    responses(
        (status = 200, description = "Route registered", body = ApiResponse<TransportRouteResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required"),
        (status = 409, description = "Route code already registered")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn create_route(
    RequireOperator(_operator): RequireOperator,
    State(state): State<TransportState>,
    AppJson(dto): AppJson<CreateTransportRouteDto>,
) -> Result<Json<ApiResponse<TransportRouteResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let route = state.transport_service.create_route(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(route.into()),
        Some("Transport route registered".to_string()),
        None,
    )))
}

/// List transport routes with optional mode/active filters
#[utoipa::path(
    get,
    path = "/api/transport/routes",
    params(ListTransportRoutesQuery),
    responses(
        (status = 200, description = "List of routes", body = ApiResponse<Vec<TransportRouteResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn list_routes(
    _user: AuthenticatedUser,
    State(state): State<TransportState>,
    Query(query): Query<ListTransportRoutesQuery>,
) -> Result<Json<ApiResponse<Vec<TransportRouteResponseDto>>>> {
    let routes = state.transport_service.list_routes(&query).await?;
    let total = routes.len() as i64;
    let dtos: Vec<TransportRouteResponseDto> = routes.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a transport route by ID
#[utoipa::path(
    get,
    path = "/api/transport/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Route found", body = ApiResponse<TransportRouteResponseDto>),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn get_route(
    _user: AuthenticatedUser,
    State(state): State<TransportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TransportRouteResponseDto>>> {
    let route = state.transport_service.get_route(id).await?;
    Ok(Json(ApiResponse::success(Some(route.into()), None, None)))
}

/// Update a transport route
#[utoipa::path(
    patch,
    path = "/api/transport/routes/{id}",
    params(("id" = Uuid, Path, description = "Route ID")),
    request_body = UpdateTransportRouteDto,
    responses(
        (status = 200, description = "Route updated", body = ApiResponse<TransportRouteResponseDto>),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn update_route(
    RequireOperator(_operator): RequireOperator,
    State(state): State<TransportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTransportRouteDto>,
) -> Result<Json<ApiResponse<TransportRouteResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let route = state.transport_service.update_route(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(route.into()),
        Some("Transport route updated".to_string()),
        None,
    )))
}

/// Report a vehicle's position on a route (upsert, the sync endpoint)
#[utoipa::path(
    put,
    path = "/api/transport/routes/{id}/vehicles/{code}",
    params(
        ("id" = Uuid, Path, description = "Route ID"),
        ("code" = String, Path, description = "Vehicle code")
    ),
    request_body = SyncVehicleDto,
    responses(
        (status = 200, description = "Location recorded", body = ApiResponse<VehicleLocationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn sync_vehicle(
    RequireOperator(_operator): RequireOperator,
    State(state): State<TransportState>,
    Path((id, code)): Path<(Uuid, String)>,
    AppJson(dto): AppJson<SyncVehicleDto>,
) -> Result<Json<ApiResponse<VehicleLocationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if !validate_vehicle_code(&code) {
        return Err(AppError::Validation(format!(
            "Vehicle code '{}' is not a valid code",
            code
        )));
    }

    let location = state.transport_service.sync_vehicle(id, &code, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Vehicle location recorded".to_string()),
        None,
    )))
}

/// Last known position of every vehicle on a route
#[utoipa::path(
    get,
    path = "/api/transport/routes/{id}/vehicles",
    params(("id" = Uuid, Path, description = "Route ID")),
    responses(
        (status = 200, description = "Vehicle positions", body = ApiResponse<Vec<VehicleLocationResponseDto>>),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn list_vehicles(
    _user: AuthenticatedUser,
    State(state): State<TransportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<VehicleLocationResponseDto>>>> {
    let vehicles = state.transport_service.list_vehicles(id).await?;
    let total = vehicles.len() as i64;
    let dtos: Vec<VehicleLocationResponseDto> = vehicles.into_iter().map(|v| v.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Estimate remaining travel minutes on a route
#[utoipa::path(
    get,
    path = "/api/transport/routes/{id}/eta",
    params(
        ("id" = Uuid, Path, description = "Route ID"),
        EtaQuery
    ),
    responses(
        (status = 200, description = "ETA estimate", body = ApiResponse<EtaResponseDto>),
        (status = 400, description = "Non-positive distance"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn get_eta(
    _user: AuthenticatedUser,
    State(state): State<TransportState>,
    Path(id): Path<Uuid>,
    Query(query): Query<EtaQuery>,
) -> Result<Json<ApiResponse<EtaResponseDto>>> {
    let route = state.transport_service.get_route(id).await?;
    let minutes = estimate_minutes(route.mode, query.distance_km, query.stops)?;

    Ok(Json(ApiResponse::success(
        Some(EtaResponseDto {
            route_id: route.id,
            mode: route.mode,
            distance_km: query.distance_km,
            stops: query.stops,
            estimated_minutes: minutes,
        }),
        None,
        None,
    )))
}

/// Publish a service announcement
#[utoipa::path(
    post,
    path = "/api/transport/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement published", body = ApiResponse<AnnouncementResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Route not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn create_announcement(
    RequireOperator(_operator): RequireOperator,
    State(state): State<TransportState>,
    AppJson(dto): AppJson<CreateAnnouncementDto>,
) -> Result<Json<ApiResponse<AnnouncementResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let announcement = state.transport_service.create_announcement(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(announcement.into()),
        Some("Announcement published".to_string()),
        None,
    )))
}

/// List current (unexpired) service announcements
#[utoipa::path(
    get,
    path = "/api/transport/announcements",
    params(ListAnnouncementsQuery),
    responses(
        (status = 200, description = "Current announcements", body = ApiResponse<Vec<AnnouncementResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "transport"
)]
pub async fn list_announcements(
    _user: AuthenticatedUser,
    State(state): State<TransportState>,
    Query(query): Query<ListAnnouncementsQuery>,
) -> Result<Json<ApiResponse<Vec<AnnouncementResponseDto>>>> {
    let announcements = state.transport_service.list_announcements(&query).await?;
    let total = announcements.len() as i64;
    let dtos: Vec<AnnouncementResponseDto> =
        announcements.into_iter().map(|a| a.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

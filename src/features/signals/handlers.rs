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
use crate::features::signals::dtos::{
    CreateScheduleDto, CreateSignalDto, ListSignalsQuery, ScheduleResponseDto, SetTimingDto,
    SignalLogDto, SignalResponseDto, TimingResponseDto, UpdateSignalStatusDto,
};
use crate::features::signals::service::SignalService;
use crate::shared::types::{ApiResponse, Meta};

/// State for signal handlers
#[derive(Clone)]
pub struct SignalState {
    pub signal_service: Arc<SignalService>,
}

/// Register a traffic signal
#[utoipa::path(
    post,
    path = "/api/signals",
    request_body = CreateSignalDto,
    responses(
        (status = 200, description = "Signal registered", body = ApiResponse<SignalResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn create_signal(
    RequireOperator(_operator): RequireOperator,
    State(state): State<SignalState>,
    AppJson(dto): AppJson<CreateSignalDto>,
) -> Result<Json<ApiResponse<SignalResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let signal = state.signal_service.create(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(signal.into()),
        Some("Traffic signal registered".to_string()),
        None,
    )))
}

/// List traffic signals with an optional status filter
#[utoipa::path(
    get,
    path = "/api/signals",
    params(ListSignalsQuery),
    responses(
        (status = 200, description = "List of signals", body = ApiResponse<Vec<SignalResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn list_signals(
    _user: AuthenticatedUser,
    State(state): State<SignalState>,
    Query(query): Query<ListSignalsQuery>,
) -> Result<Json<ApiResponse<Vec<SignalResponseDto>>>> {
    let signals = state.signal_service.list(&query).await?;
    let total = signals.len() as i64;
    let dtos: Vec<SignalResponseDto> = signals.into_iter().map(|s| s.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a traffic signal by ID
#[utoipa::path(
    get,
    path = "/api/signals/{id}",
    params(("id" = Uuid, Path, description = "Signal ID")),
    responses(
        (status = 200, description = "Signal found", body = ApiResponse<SignalResponseDto>),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn get_signal(
    _user: AuthenticatedUser,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SignalResponseDto>>> {
    let signal = state.signal_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(signal.into()), None, None)))
}

/// Change a signal's operational status
#[utoipa::path(
    patch,
    path = "/api/signals/{id}/status",
    params(("id" = Uuid, Path, description = "Signal ID")),
    request_body = UpdateSignalStatusDto,
    responses(
        (status = 200, description = "Status changed and logged", body = ApiResponse<SignalResponseDto>),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn update_signal_status(
    RequireOperator(operator): RequireOperator,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSignalStatusDto>,
) -> Result<Json<ApiResponse<SignalResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let signal = state
        .signal_service
        .update_status(id, &operator.user_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(signal.into()),
        Some("Signal status updated".to_string()),
        None,
    )))
}

/// Set the phase timing of a signal (upsert)
#[utoipa::path(
    put,
    path = "/api/signals/{id}/timing",
    params(("id" = Uuid, Path, description = "Signal ID")),
    request_body = SetTimingDto,
    responses(
        (status = 200, description = "Timing set", body = ApiResponse<TimingResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn set_timing(
    RequireOperator(operator): RequireOperator,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<SetTimingDto>,
) -> Result<Json<ApiResponse<TimingResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let timing = state
        .signal_service
        .set_timing(id, &operator.user_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(timing.into()),
        Some("Signal timing updated".to_string()),
        None,
    )))
}

/// Get the phase timing of a signal
#[utoipa::path(
    get,
    path = "/api/signals/{id}/timing",
    params(("id" = Uuid, Path, description = "Signal ID")),
    responses(
        (status = 200, description = "Timing found", body = ApiResponse<TimingResponseDto>),
        (status = 404, description = "Signal or timing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn get_timing(
    _user: AuthenticatedUser,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TimingResponseDto>>> {
    let timing = state.signal_service.get_timing(id).await?;
    Ok(Json(ApiResponse::success(Some(timing.into()), None, None)))
}

/// Add an operating schedule to a signal
#[utoipa::path(
    post,
    path = "/api/signals/{id}/schedules",
    params(("id" = Uuid, Path, description = "Signal ID")),
    request_body = CreateScheduleDto,
    responses(
        (status = 200, description = "Schedule added", body = ApiResponse<ScheduleResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn add_schedule(
    RequireOperator(operator): RequireOperator,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateScheduleDto>,
) -> Result<Json<ApiResponse<ScheduleResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let schedule = state
        .signal_service
        .add_schedule(id, &operator.user_id, dto)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(schedule.into()),
        Some("Schedule added".to_string()),
        None,
    )))
}

/// List the operating schedules of a signal
#[utoipa::path(
    get,
    path = "/api/signals/{id}/schedules",
    params(("id" = Uuid, Path, description = "Signal ID")),
    responses(
        (status = 200, description = "List of schedules", body = ApiResponse<Vec<ScheduleResponseDto>>),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn list_schedules(
    _user: AuthenticatedUser,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ScheduleResponseDto>>>> {
    let schedules = state.signal_service.list_schedules(id).await?;
    let dtos: Vec<ScheduleResponseDto> = schedules.into_iter().map(|s| s.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get the operational log of a signal, newest first
#[utoipa::path(
    get,
    path = "/api/signals/{id}/logs",
    params(("id" = Uuid, Path, description = "Signal ID")),
    responses(
        (status = 200, description = "Operational log", body = ApiResponse<Vec<SignalLogDto>>),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn get_logs(
    _user: AuthenticatedUser,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SignalLogDto>>>> {
    let logs = state.signal_service.logs(id).await?;
    let dtos: Vec<SignalLogDto> = logs.into_iter().map(|l| l.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Delete a traffic signal
#[utoipa::path(
    delete,
    path = "/api/signals/{id}",
    params(("id" = Uuid, Path, description = "Signal ID")),
    responses(
        (status = 200, description = "Signal deleted"),
        (status = 403, description = "Operator access required"),
        (status = 404, description = "Signal not found")
    ),
    security(("bearer_auth" = [])),
    tag = "signals"
)]
pub async fn delete_signal(
    RequireOperator(_operator): RequireOperator,
    State(state): State<SignalState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.signal_service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Traffic signal deleted".to_string()),
        None,
    )))
}

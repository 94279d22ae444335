use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    AttachmentResponseDto, CreateReportDto, ListReportsQuery, ReportResponseDto,
    UpdateReportStatusDto,
};
use crate::features::reports::service::ReportService;
use crate::features::workflow::dtos::StatusHistoryDto;
use crate::features::workflow::models::{AdminActionKind, EntityKind};
use crate::features::workflow::WorkflowService;
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub workflow_service: Arc<WorkflowService>,
}

/// Submit a new accident/violation report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 200, description = "Report submitted", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.report_service.create(&user.user_id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report submitted".to_string()),
        None,
    )))
}

/// List reports with optional filters
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "List of reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (reports, total) = state.report_service.list(&query).await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state.report_service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Transition a report's status (admin review)
///
/// Updates the report and appends a status-history entry in one
/// transaction. Any status may be set, including the current one.
#[utoipa::path(
    patch,
    path = "/api/reports/{id}/status",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .workflow_service
        .transition_report(id, dto.status, &admin.user_id, dto.reason.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report status updated".to_string()),
        None,
    )))
}

/// Get the status trail of a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/history",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Status history, newest first", body = ApiResponse<Vec<StatusHistoryDto>>),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report_history(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<StatusHistoryDto>>>> {
    state.report_service.get(id).await?;

    let entries = state
        .workflow_service
        .history(EntityKind::Report, id)
        .await?;
    let dtos: Vec<StatusHistoryDto> = entries.into_iter().map(|e| e.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Upload a photo for a report (multipart field "file")
#[utoipa::path(
    post,
    path = "/api/reports/{id}/attachments",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Photo uploaded", body = ApiResponse<AttachmentResponseDto>),
        (status = 400, description = "Missing file field"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn upload_attachment(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<AttachmentResponseDto>>> {
    let mut uploaded = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            uploaded = Some((file_name, content_type, data));
            break;
        }
    }

    let (file_name, content_type, data) =
        uploaded.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    let dto = state
        .report_service
        .add_attachment(id, &file_name, &content_type, &data)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(dto),
        Some("Photo uploaded".to_string()),
        None,
    )))
}

/// List photos attached to a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/attachments",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Attachments with download URLs", body = ApiResponse<Vec<AttachmentResponseDto>>)
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_attachments(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AttachmentResponseDto>>>> {
    let dtos = state.report_service.list_attachments(id).await?;
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Delete a report and its photos
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn delete_report(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<ReportState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.report_service.delete(id).await?;

    state
        .workflow_service
        .record_standalone_action(
            &admin.user_id,
            AdminActionKind::ReportDeleted,
            EntityKind::Report,
            id,
            None,
        )
        .await?;

    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted".to_string()),
        None,
    )))
}

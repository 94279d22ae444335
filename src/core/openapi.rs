use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dto as auth_dto, handlers as auth_handlers, model as auth_model};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::diversions::{
    dtos as diversions_dtos, handlers as diversions_handlers, models as diversions_models,
};
use crate::features::permits::{
    dtos as permits_dtos, handlers as permits_handlers, models as permits_models,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::road_updates::{
    dtos as road_updates_dtos, handlers as road_updates_handlers,
    models as road_updates_models,
};
use crate::features::signals::{
    dtos as signals_dtos, handlers as signals_handlers, models as signals_models,
};
use crate::features::transport::{
    dtos as transport_dtos, handlers as transport_handlers, models as transport_models,
};
use crate::features::workflow::dtos as workflow_dtos;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::get_me,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::delete_report,
        reports_handlers::update_report_status,
        reports_handlers::get_report_history,
        reports_handlers::upload_attachment,
        reports_handlers::list_attachments,
        // Permits
        permits_handlers::create_permit,
        permits_handlers::list_permits,
        permits_handlers::get_permit,
        permits_handlers::update_permit_status,
        permits_handlers::get_permit_history,
        // Diversions
        diversions_handlers::create_notice,
        diversions_handlers::list_notices,
        diversions_handlers::get_notice,
        diversions_handlers::update_notice,
        diversions_handlers::delete_notice,
        diversions_handlers::create_route,
        diversions_handlers::list_routes,
        diversions_handlers::update_route,
        diversions_handlers::delete_route,
        // Road updates
        road_updates_handlers::create_road_update,
        road_updates_handlers::list_road_updates,
        road_updates_handlers::get_road_update,
        road_updates_handlers::update_road_update,
        road_updates_handlers::delete_road_update,
        // Signals
        signals_handlers::create_signal,
        signals_handlers::list_signals,
        signals_handlers::get_signal,
        signals_handlers::delete_signal,
        signals_handlers::update_signal_status,
        signals_handlers::set_timing,
        signals_handlers::get_timing,
        signals_handlers::add_schedule,
        signals_handlers::list_schedules,
        signals_handlers::get_logs,
        // Transport
        transport_handlers::create_route,
        transport_handlers::list_routes,
        transport_handlers::get_route,
        transport_handlers::update_route,
        transport_handlers::sync_vehicle,
        transport_handlers::list_vehicles,
        transport_handlers::get_eta,
        transport_handlers::create_announcement,
        transport_handlers::list_announcements,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AuthenticatedUser,
            auth_dto::MeResponseDto,
            ApiResponse<auth_dto::MeResponseDto>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportPriority,
            reports_models::ReportCategory,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::AttachmentResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::AttachmentResponseDto>,
            ApiResponse<Vec<reports_dtos::AttachmentResponseDto>>,
            // Workflow
            workflow_dtos::StatusHistoryDto,
            ApiResponse<Vec<workflow_dtos::StatusHistoryDto>>,
            // Permits
            permits_models::PermitStatus,
            permits_dtos::CreatePermitDto,
            permits_dtos::UpdatePermitStatusDto,
            permits_dtos::PermitResponseDto,
            ApiResponse<permits_dtos::PermitResponseDto>,
            ApiResponse<Vec<permits_dtos::PermitResponseDto>>,
            // Diversions
            diversions_models::NoticeStatus,
            diversions_models::NoticePriority,
            diversions_models::DisplayState,
            diversions_models::RouteStatus,
            diversions_dtos::CreateNoticeDto,
            diversions_dtos::UpdateNoticeDto,
            diversions_dtos::NoticeResponseDto,
            diversions_dtos::CreateRouteDto,
            diversions_dtos::UpdateRouteDto,
            diversions_dtos::RouteResponseDto,
            ApiResponse<diversions_dtos::NoticeResponseDto>,
            ApiResponse<Vec<diversions_dtos::NoticeResponseDto>>,
            ApiResponse<diversions_dtos::RouteResponseDto>,
            ApiResponse<Vec<diversions_dtos::RouteResponseDto>>,
            // Road updates
            road_updates_models::RoadUpdateKind,
            road_updates_models::RoadUpdateStatus,
            road_updates_dtos::CreateRoadUpdateDto,
            road_updates_dtos::UpdateRoadUpdateDto,
            road_updates_dtos::RoadUpdateResponseDto,
            ApiResponse<road_updates_dtos::RoadUpdateResponseDto>,
            ApiResponse<Vec<road_updates_dtos::RoadUpdateResponseDto>>,
            // Signals
            signals_models::SignalStatus,
            signals_models::SignalEvent,
            signals_dtos::CreateSignalDto,
            signals_dtos::UpdateSignalStatusDto,
            signals_dtos::SetTimingDto,
            signals_dtos::CreateScheduleDto,
            signals_dtos::SignalResponseDto,
            signals_dtos::TimingResponseDto,
            signals_dtos::ScheduleResponseDto,
            signals_dtos::SignalLogDto,
            ApiResponse<signals_dtos::SignalResponseDto>,
            ApiResponse<Vec<signals_dtos::SignalResponseDto>>,
            ApiResponse<signals_dtos::TimingResponseDto>,
            ApiResponse<signals_dtos::ScheduleResponseDto>,
            ApiResponse<Vec<signals_dtos::ScheduleResponseDto>>,
            ApiResponse<Vec<signals_dtos::SignalLogDto>>,
            // Transport
            transport_models::TransportMode,
            transport_models::AnnouncementSeverity,
            transport_dtos::CreateTransportRouteDto,
            transport_dtos::UpdateTransportRouteDto,
            transport_dtos::SyncVehicleDto,
            transport_dtos::CreateAnnouncementDto,
            transport_dtos::TransportRouteResponseDto,
            transport_dtos::VehicleLocationResponseDto,
            transport_dtos::EtaResponseDto,
            transport_dtos::AnnouncementResponseDto,
            ApiResponse<transport_dtos::TransportRouteResponseDto>,
            ApiResponse<Vec<transport_dtos::TransportRouteResponseDto>>,
            ApiResponse<transport_dtos::VehicleLocationResponseDto>,
            ApiResponse<Vec<transport_dtos::VehicleLocationResponseDto>>,
            ApiResponse<transport_dtos::EtaResponseDto>,
            ApiResponse<transport_dtos::AnnouncementResponseDto>,
            ApiResponse<Vec<transport_dtos::AnnouncementResponseDto>>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::ReportCountsDto,
            dashboard_dtos::PermitCountsDto,
            dashboard_dtos::DiversionCountsDto,
            dashboard_dtos::RoadUpdateCountsDto,
            dashboard_dtos::SignalCountsDto,
            dashboard_dtos::TransportCountsDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "Session introspection"),
        (name = "reports", description = "Accident and violation reports with review workflow"),
        (name = "permits", description = "Permit applications and decisions"),
        (name = "diversions", description = "Diversion notices and named city routes"),
        (name = "road-updates", description = "Real-time road condition updates"),
        (name = "signals", description = "Traffic signal control, timings, schedules and logs"),
        (name = "transport", description = "Public transport routes, vehicle sync, ETA and announcements"),
        (name = "dashboard", description = "Back-office overview counts"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cityways API",
        version = "0.1.0",
        description = "Traffic and transport management back-office API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

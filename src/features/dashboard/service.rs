use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{
    DashboardSummaryDto, DiversionCountsDto, PermitCountsDto, ReportCountsDto,
    RoadUpdateCountsDto, SignalCountsDto, TransportCountsDto,
};

#[derive(FromRow)]
struct SummaryRow {
    reports_total: i64,
    reports_pending: i64,
    reports_verified: i64,
    reports_invalid: i64,
    permits_total: i64,
    permits_pending: i64,
    permits_approved: i64,
    permits_rejected: i64,
    diversions_total: i64,
    diversions_active: i64,
    road_updates_total: i64,
    road_updates_active: i64,
    road_updates_resolved: i64,
    signals_total: i64,
    signals_active: i64,
    signals_fault: i64,
    transport_routes: i64,
    transport_active_routes: i64,
    transport_announcements: i64,
}

/// Service for the back-office overview counts
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One round trip: every count as a scalar subquery.
    pub async fn summary(&self) -> Result<DashboardSummaryDto> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT \
                (SELECT COUNT(*) FROM reports) AS reports_total, \
                (SELECT COUNT(*) FROM reports WHERE status = 'pending') AS reports_pending, \
                (SELECT COUNT(*) FROM reports WHERE status = 'verified') AS reports_verified, \
                (SELECT COUNT(*) FROM reports WHERE status = 'invalid') AS reports_invalid, \
                (SELECT COUNT(*) FROM permits) AS permits_total, \
                (SELECT COUNT(*) FROM permits WHERE status = 'pending') AS permits_pending, \
                (SELECT COUNT(*) FROM permits WHERE status = 'approved') AS permits_approved, \
                (SELECT COUNT(*) FROM permits WHERE status = 'rejected') AS permits_rejected, \
                (SELECT COUNT(*) FROM diversion_notices) AS diversions_total, \
                (SELECT COUNT(*) FROM diversion_notices \
                    WHERE status = 'active' AND ends_at > NOW()) AS diversions_active, \
                (SELECT COUNT(*) FROM road_updates) AS road_updates_total, \
                (SELECT COUNT(*) FROM road_updates WHERE status = 'active') AS road_updates_active, \
                (SELECT COUNT(*) FROM road_updates WHERE status = 'resolved') AS road_updates_resolved, \
                (SELECT COUNT(*) FROM traffic_signals) AS signals_total, \
                (SELECT COUNT(*) FROM traffic_signals WHERE status = 'active') AS signals_active, \
                (SELECT COUNT(*) FROM traffic_signals WHERE status = 'fault') AS signals_fault, \
                (SELECT COUNT(*) FROM transport_routes) AS transport_routes, \
                (SELECT COUNT(*) FROM transport_routes WHERE is_active) AS transport_active_routes, \
                (SELECT COUNT(*) FROM service_announcements \
                    WHERE expires_at IS NULL OR expires_at > NOW()) AS transport_announcements",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard summary: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardSummaryDto {
            reports: ReportCountsDto {
                total: row.reports_total,
                pending: row.reports_pending,
                verified: row.reports_verified,
                invalid: row.reports_invalid,
            },
            permits: PermitCountsDto {
                total: row.permits_total,
                pending: row.permits_pending,
                approved: row.permits_approved,
                rejected: row.permits_rejected,
            },
            diversions: DiversionCountsDto {
                total: row.diversions_total,
                active: row.diversions_active,
            },
            road_updates: RoadUpdateCountsDto {
                total: row.road_updates_total,
                active: row.road_updates_active,
                resolved: row.road_updates_resolved,
            },
            signals: SignalCountsDto {
                total: row.signals_total,
                active: row.signals_active,
                fault: row.signals_fault,
            },
            transport: TransportCountsDto {
                routes: row.transport_routes,
                active_routes: row.transport_active_routes,
                current_announcements: row.transport_announcements,
            },
        })
    }
}

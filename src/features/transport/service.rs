use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::transport::dtos::{
    CreateAnnouncementDto, CreateTransportRouteDto, ListAnnouncementsQuery,
    ListTransportRoutesQuery, SyncVehicleDto, UpdateTransportRouteDto,
};
use crate::features::transport::models::{ServiceAnnouncement, TransportRoute, VehicleLocation};

const ROUTE_COLUMNS: &str = "id, code, name, mode, origin, destination, distance_km, \
     stop_count, is_active, created_at, updated_at";

const LOCATION_COLUMNS: &str =
    "id, route_id, vehicle_code, latitude, longitude, heading, recorded_at";

const ANNOUNCEMENT_COLUMNS: &str =
    "id, route_id, title, body, severity, published_at, expires_at, created_at";

/// Service for transport routes, vehicle location sync and announcements
pub struct TransportService {
    pool: PgPool,
}

impl TransportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ===== Transport routes =====

    pub async fn create_route(&self, dto: CreateTransportRouteDto) -> Result<TransportRoute> {
        let route = sqlx::query_as::<_, TransportRoute>(&format!(
            "INSERT INTO transport_routes \
             (code, name, mode, origin, destination, distance_km, stop_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(&dto.code)
        .bind(&dto.name)
        .bind(dto.mode)
        .bind(&dto.origin)
        .bind(&dto.destination)
        .bind(dto.distance_km)
        .bind(dto.stop_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Route code '{}' is already registered", dto.code))
            }
            _ => {
                tracing::error!("Failed to create transport route: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Transport route {} registered ({})", route.code, route.id);
        Ok(route)
    }

    pub async fn list_routes(
        &self,
        query: &ListTransportRoutesQuery,
    ) -> Result<Vec<TransportRoute>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {ROUTE_COLUMNS} FROM transport_routes WHERE 1=1"
        ));
        if let Some(mode) = query.mode {
            qb.push(" AND mode = ").push_bind(mode);
        }
        if let Some(active) = query.active {
            qb.push(" AND is_active = ").push_bind(active);
        }
        qb.push(" ORDER BY code");

        qb.build_query_as::<TransportRoute>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list transport routes: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_route(&self, id: Uuid) -> Result<TransportRoute> {
        let route = sqlx::query_as::<_, TransportRoute>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM transport_routes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        route.ok_or_else(|| AppError::NotFound(format!("Transport route {} not found", id)))
    }

    pub async fn update_route(
        &self,
        id: Uuid,
        dto: UpdateTransportRouteDto,
    ) -> Result<TransportRoute> {
        let route = sqlx::query_as::<_, TransportRoute>(&format!(
            "UPDATE transport_routes SET \
                name = COALESCE($2, name), \
                distance_km = COALESCE($3, distance_km), \
                stop_count = COALESCE($4, stop_count), \
                is_active = COALESCE($5, is_active), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(dto.distance_km)
        .bind(dto.stop_count)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update transport route: {:?}", e);
            AppError::Database(e)
        })?;

        route.ok_or_else(|| AppError::NotFound(format!("Transport route {} not found", id)))
    }

    // ===== Vehicle location sync =====

    /// Upsert keyed on (route, vehicle code). The sync endpoint calls this
    /// on every position report.
    pub async fn sync_vehicle(
        &self,
        route_id: Uuid,
        vehicle_code: &str,
        dto: SyncVehicleDto,
    ) -> Result<VehicleLocation> {
        self.get_route(route_id).await?;

        let location = sqlx::query_as::<_, VehicleLocation>(&format!(
            "INSERT INTO vehicle_locations \
             (route_id, vehicle_code, latitude, longitude, heading, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             ON CONFLICT (route_id, vehicle_code) DO UPDATE SET \
                latitude = EXCLUDED.latitude, \
                longitude = EXCLUDED.longitude, \
                heading = EXCLUDED.heading, \
                recorded_at = NOW() \
             RETURNING {LOCATION_COLUMNS}"
        ))
        .bind(route_id)
        .bind(vehicle_code)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(dto.heading)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to sync vehicle location: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(location)
    }

    pub async fn list_vehicles(&self, route_id: Uuid) -> Result<Vec<VehicleLocation>> {
        self.get_route(route_id).await?;

        sqlx::query_as::<_, VehicleLocation>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM vehicle_locations \
             WHERE route_id = $1 ORDER BY vehicle_code"
        ))
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list vehicle locations: {:?}", e);
            AppError::Database(e)
        })
    }

    // ===== Service announcements =====

    pub async fn create_announcement(
        &self,
        dto: CreateAnnouncementDto,
    ) -> Result<ServiceAnnouncement> {
        if let Some(route_id) = dto.route_id {
            self.get_route(route_id).await?;
        }

        let announcement = sqlx::query_as::<_, ServiceAnnouncement>(&format!(
            "INSERT INTO service_announcements \
             (route_id, title, body, severity, published_at, expires_at) \
             VALUES ($1, $2, $3, $4, NOW(), $5) \
             RETURNING {ANNOUNCEMENT_COLUMNS}"
        ))
        .bind(dto.route_id)
        .bind(&dto.title)
        .bind(&dto.body)
        .bind(dto.severity)
        .bind(dto.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to publish announcement: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Service announcement '{}' published ({})",
            announcement.title,
            announcement.id
        );
        Ok(announcement)
    }

    pub async fn list_announcements(
        &self,
        query: &ListAnnouncementsQuery,
    ) -> Result<Vec<ServiceAnnouncement>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {ANNOUNCEMENT_COLUMNS} FROM service_announcements \
             WHERE (expires_at IS NULL OR expires_at > NOW())"
        ));
        if let Some(route_id) = query.route_id {
            qb.push(" AND route_id = ").push_bind(route_id);
        }
        if let Some(severity) = query.severity {
            qb.push(" AND severity = ").push_bind(severity);
        }
        qb.push(" ORDER BY published_at DESC");

        qb.build_query_as::<ServiceAnnouncement>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list announcements: {:?}", e);
                AppError::Database(e)
            })
    }
}

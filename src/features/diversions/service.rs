use chrono::{DateTime, Utc};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::diversions::dtos::{
    CreateNoticeDto, CreateRouteDto, ListNoticesQuery, UpdateNoticeDto, UpdateRouteDto,
};
use crate::features::diversions::models::{DiversionNotice, Route};

const NOTICE_COLUMNS: &str = "id, road_name, reason, starts_at, ends_at, alternate_route, \
     priority, status, created_by, created_at, updated_at";

const ROUTE_COLUMNS: &str =
    "id, name, origin, destination, distance_km, via, status, created_at, updated_at";

/// Service for diversion notices and named city routes
pub struct DiversionService {
    pool: PgPool,
}

impl DiversionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ===== Diversion notices =====

    pub async fn create_notice(
        &self,
        created_by: &str,
        dto: CreateNoticeDto,
    ) -> Result<DiversionNotice> {
        validate_window(dto.starts_at, dto.ends_at)?;

        let notice = sqlx::query_as::<_, DiversionNotice>(&format!(
            "INSERT INTO diversion_notices \
             (road_name, reason, starts_at, ends_at, alternate_route, priority, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(&dto.road_name)
        .bind(&dto.reason)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .bind(&dto.alternate_route)
        .bind(dto.priority)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create diversion notice: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Diversion notice posted for '{}' by {} ({})",
            notice.road_name,
            created_by,
            notice.id
        );
        Ok(notice)
    }

    pub async fn list_notices(&self, query: &ListNoticesQuery) -> Result<Vec<DiversionNotice>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {NOTICE_COLUMNS} FROM diversion_notices WHERE 1=1"
        ));
        if let Some(status) = query.status {
            qb.push(" AND status = ").push_bind(status);
        }
        qb.push(" ORDER BY starts_at DESC");

        qb.build_query_as::<DiversionNotice>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list diversion notices: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get_notice(&self, id: Uuid) -> Result<DiversionNotice> {
        let notice = sqlx::query_as::<_, DiversionNotice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM diversion_notices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        notice.ok_or_else(|| AppError::NotFound(format!("Diversion notice {} not found", id)))
    }

    /// Direct field overwrite, no status history
    pub async fn update_notice(&self, id: Uuid, dto: UpdateNoticeDto) -> Result<DiversionNotice> {
        let current = self.get_notice(id).await?;

        let ends_at = dto.ends_at.unwrap_or(current.ends_at);
        validate_window(current.starts_at, ends_at)?;

        let notice = sqlx::query_as::<_, DiversionNotice>(&format!(
            "UPDATE diversion_notices SET \
                reason = COALESCE($2, reason), \
                ends_at = $3, \
                alternate_route = COALESCE($4, alternate_route), \
                priority = COALESCE($5, priority), \
                status = COALESCE($6, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.reason)
        .bind(ends_at)
        .bind(&dto.alternate_route)
        .bind(dto.priority)
        .bind(dto.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update diversion notice: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(notice)
    }

    pub async fn delete_notice(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM diversion_notices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Diversion notice {} not found",
                id
            )));
        }
        tracing::info!("Diversion notice {} deleted", id);
        Ok(())
    }

    // ===== City routes =====

    pub async fn create_route(&self, dto: CreateRouteDto) -> Result<Route> {
        let route = sqlx::query_as::<_, Route>(&format!(
            "INSERT INTO routes (name, origin, destination, distance_km, via) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.origin)
        .bind(&dto.destination)
        .bind(dto.distance_km)
        .bind(&dto.via)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create route: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(route)
    }

    pub async fn list_routes(&self) -> Result<Vec<Route>> {
        sqlx::query_as::<_, Route>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list routes: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Direct field overwrite, no status history
    pub async fn update_route(&self, id: Uuid, dto: UpdateRouteDto) -> Result<Route> {
        let route = sqlx::query_as::<_, Route>(&format!(
            "UPDATE routes SET \
                via = COALESCE($2, via), \
                distance_km = COALESCE($3, distance_km), \
                status = COALESCE($4, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.via)
        .bind(dto.distance_km)
        .bind(dto.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update route: {:?}", e);
            AppError::Database(e)
        })?;

        route.ok_or_else(|| AppError::NotFound(format!("Route {} not found", id)))
    }

    pub async fn delete_route(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Route {} not found", id)));
        }
        Ok(())
    }
}

fn validate_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<()> {
    if ends_at < starts_at {
        return Err(AppError::Validation(format!(
            "Window end {} is before start {}",
            ends_at, starts_at
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rejects_inverted_window() {
        let start = Utc.timestamp_opt(2000, 0).unwrap();
        let end = Utc.timestamp_opt(1000, 0).unwrap();
        assert!(matches!(
            validate_window(start, end),
            Err(AppError::Validation(_))
        ));
        assert!(validate_window(end, start).is_ok());
        assert!(validate_window(start, start).is_ok());
    }
}

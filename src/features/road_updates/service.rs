use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::road_updates::dtos::{
    CreateRoadUpdateDto, ListRoadUpdatesQuery, UpdateRoadUpdateDto,
};
use crate::features::road_updates::models::RoadUpdate;

const UPDATE_COLUMNS: &str =
    "id, road_name, kind, description, status, reported_by, created_at, updated_at";

/// Service for real-time road updates, plain overwrite semantics
pub struct RoadUpdateService {
    pool: PgPool,
}

impl RoadUpdateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, reported_by: &str, dto: CreateRoadUpdateDto) -> Result<RoadUpdate> {
        let update = sqlx::query_as::<_, RoadUpdate>(&format!(
            "INSERT INTO road_updates (road_name, kind, description, reported_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {UPDATE_COLUMNS}"
        ))
        .bind(&dto.road_name)
        .bind(dto.kind)
        .bind(&dto.description)
        .bind(reported_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create road update: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Road update posted for '{}' by {} ({})",
            update.road_name,
            reported_by,
            update.id
        );
        Ok(update)
    }

    pub async fn list(&self, query: &ListRoadUpdatesQuery) -> Result<Vec<RoadUpdate>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {UPDATE_COLUMNS} FROM road_updates WHERE 1=1"
        ));
        if let Some(status) = query.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(kind) = query.kind {
            qb.push(" AND kind = ").push_bind(kind);
        }
        qb.push(" ORDER BY created_at DESC");

        qb.build_query_as::<RoadUpdate>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list road updates: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<RoadUpdate> {
        let update = sqlx::query_as::<_, RoadUpdate>(&format!(
            "SELECT {UPDATE_COLUMNS} FROM road_updates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        update.ok_or_else(|| AppError::NotFound(format!("Road update {} not found", id)))
    }

    /// Overwrites fields in place, status included. No history trail.
    pub async fn update(&self, id: Uuid, dto: UpdateRoadUpdateDto) -> Result<RoadUpdate> {
        let update = sqlx::query_as::<_, RoadUpdate>(&format!(
            "UPDATE road_updates SET \
                kind = COALESCE($2, kind), \
                description = COALESCE($3, description), \
                status = COALESCE($4, status), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {UPDATE_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.kind)
        .bind(&dto.description)
        .bind(dto.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update road update: {:?}", e);
            AppError::Database(e)
        })?;

        update.ok_or_else(|| AppError::NotFound(format!("Road update {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM road_updates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Road update {} not found", id)));
        }
        tracing::info!("Road update {} deleted", id);
        Ok(())
    }
}

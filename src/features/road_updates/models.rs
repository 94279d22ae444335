use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of road condition being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "road_update_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoadUpdateKind {
    Closure,
    Construction,
    Congestion,
    Incident,
    Event,
}

/// Lifecycle of a road update, overwritten directly (no history trail)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "road_update_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoadUpdateStatus {
    Active,
    Resolved,
}

/// Database model for a road update
#[derive(Debug, Clone, FromRow)]
pub struct RoadUpdate {
    pub id: Uuid,
    pub road_name: String,
    pub kind: RoadUpdateKind,
    pub description: String,
    pub status: RoadUpdateStatus,
    pub reported_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

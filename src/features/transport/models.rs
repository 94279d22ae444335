use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Public transport mode, also keys the ETA speed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "transport_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Tram,
    Ferry,
}

/// Severity of a service announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "announcement_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementSeverity {
    Info,
    Warning,
    Disruption,
}

/// Database model for a public transport route
#[derive(Debug, Clone, FromRow)]
pub struct TransportRoute {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub mode: TransportMode,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub stop_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the last known position of a vehicle on a route
#[derive(Debug, Clone, FromRow)]
pub struct VehicleLocation {
    pub id: Uuid,
    pub route_id: Uuid,
    pub vehicle_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// Database model for a service announcement
#[derive(Debug, Clone, FromRow)]
pub struct ServiceAnnouncement {
    pub id: Uuid,
    pub route_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub severity: AnnouncementSeverity,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

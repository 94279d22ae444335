use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::transport::models::{
    AnnouncementSeverity, ServiceAnnouncement, TransportMode, TransportRoute, VehicleLocation,
};
use crate::shared::validation::{ROUTE_CODE_REGEX, VEHICLE_CODE_REGEX};

/// Request DTO for registering a transport route
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransportRouteDto {
    #[validate(regex(
        path = *ROUTE_CODE_REGEX,
        message = "Code must be uppercase alphanumeric groups separated by hyphens"
    ))]
    pub code: String,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub mode: TransportMode,

    #[validate(length(min = 1, max = 255, message = "Origin must be 1-255 characters"))]
    pub origin: String,

    #[validate(length(min = 1, max = 255, message = "Destination must be 1-255 characters"))]
    pub destination: String,

    #[validate(range(min = 0.1, message = "Distance must be positive"))]
    pub distance_km: f64,

    #[validate(range(min = 0, max = 500, message = "Stop count must be 0-500"))]
    pub stop_count: i32,
}

/// Request DTO for updating a transport route
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransportRouteDto {
    #[validate(length(max = 255, message = "Name must not exceed 255 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0.1, message = "Distance must be positive"))]
    pub distance_km: Option<f64>,

    #[validate(range(min = 0, max = 500, message = "Stop count must be 0-500"))]
    pub stop_count: Option<i32>,

    pub is_active: Option<bool>,
}

/// Query params for listing transport routes
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListTransportRoutesQuery {
    pub mode: Option<TransportMode>,
    pub active: Option<bool>,
}

/// Request DTO for the vehicle location sync
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncVehicleDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be -90 to 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be -180 to 180"))]
    pub longitude: f64,

    #[validate(range(min = 0.0, max = 360.0, message = "Heading must be 0-360 degrees"))]
    pub heading: Option<f64>,
}

/// Query params for the ETA endpoint
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EtaQuery {
    /// Remaining distance in kilometers, must be positive
    pub distance_km: f64,
    /// Intermediate stops remaining, defaults to zero
    #[serde(default)]
    pub stops: u32,
}

/// Request DTO for publishing a service announcement
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementDto {
    /// Route the announcement applies to, omit for network-wide notices
    pub route_id: Option<Uuid>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Body must be 1-5000 characters"))]
    pub body: String,

    #[serde(default = "default_severity")]
    pub severity: AnnouncementSeverity,

    pub expires_at: Option<DateTime<Utc>>,
}

fn default_severity() -> AnnouncementSeverity {
    AnnouncementSeverity::Info
}

/// Query params for listing announcements
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListAnnouncementsQuery {
    pub route_id: Option<Uuid>,
    pub severity: Option<AnnouncementSeverity>,
}

/// Response DTO for a transport route
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportRouteResponseDto {
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

impl From<TransportRoute> for TransportRouteResponseDto {
    fn from(r: TransportRoute) -> Self {
        Self {
            id: r.id,
            code: r.code,
            name: r.name,
            mode: r.mode,
            origin: r.origin,
            destination: r.destination,
            distance_km: r.distance_km,
            stop_count: r.stop_count,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response DTO for a vehicle's last known position
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocationResponseDto {
    pub route_id: Uuid,
    pub vehicle_code: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl From<VehicleLocation> for VehicleLocationResponseDto {
    fn from(v: VehicleLocation) -> Self {
        Self {
            route_id: v.route_id,
            vehicle_code: v.vehicle_code,
            latitude: v.latitude,
            longitude: v.longitude,
            heading: v.heading,
            recorded_at: v.recorded_at,
        }
    }
}

/// Response DTO for an ETA estimate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EtaResponseDto {
    pub route_id: Uuid,
    pub mode: TransportMode,
    pub distance_km: f64,
    pub stops: u32,
    pub estimated_minutes: f64,
}

/// Response DTO for a service announcement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponseDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub severity: AnnouncementSeverity,
    pub published_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceAnnouncement> for AnnouncementResponseDto {
    fn from(a: ServiceAnnouncement) -> Self {
        Self {
            id: a.id,
            route_id: a.route_id,
            title: a.title,
            body: a.body,
            severity: a.severity,
            published_at: a.published_at,
            expires_at: a.expires_at,
            created_at: a.created_at,
        }
    }
}

/// Validate a vehicle code path segment against the shared pattern
pub fn validate_vehicle_code(code: &str) -> bool {
    VEHICLE_CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_codes_follow_the_shared_pattern() {
        assert!(validate_vehicle_code("BUS-042"));
        assert!(validate_vehicle_code("T12"));
        assert!(!validate_vehicle_code("bus-042"));
        assert!(!validate_vehicle_code(""));
    }
}

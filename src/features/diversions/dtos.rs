use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::diversions::models::{
    display_state, DisplayState, DiversionNotice, NoticePriority, NoticeStatus, Route, RouteStatus,
};

/// Request DTO for posting a diversion notice
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, max = 255, message = "Road name must be 1-255 characters"))]
    pub road_name: String,

    #[validate(length(min = 1, max = 2000, message = "Reason must be 1-2000 characters"))]
    pub reason: String,

    pub starts_at: DateTime<Utc>,

    /// Must not be before `startsAt`
    pub ends_at: DateTime<Utc>,

    #[validate(length(min = 1, max = 2000, message = "Alternate route must be 1-2000 characters"))]
    pub alternate_route: String,

    #[serde(default = "default_priority")]
    pub priority: NoticePriority,
}

fn default_priority() -> NoticePriority {
    NoticePriority::Medium
}

/// Request DTO for updating a diversion notice (direct overwrite, no history)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeDto {
    #[validate(length(max = 2000, message = "Reason must not exceed 2000 characters"))]
    pub reason: Option<String>,

    pub ends_at: Option<DateTime<Utc>>,

    #[validate(length(max = 2000, message = "Alternate route must not exceed 2000 characters"))]
    pub alternate_route: Option<String>,

    pub priority: Option<NoticePriority>,

    pub status: Option<NoticeStatus>,
}

/// Query params for listing notices
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListNoticesQuery {
    pub status: Option<NoticeStatus>,
}

/// Response DTO for a diversion notice, including the derived display state
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponseDto {
    pub id: Uuid,
    pub road_name: String,
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub alternate_route: String,
    pub priority: NoticePriority,
    pub status: NoticeStatus,
    /// active/expired/inactive, computed from `status` and `endsAt` vs now
    pub display_state: DisplayState,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoticeResponseDto {
    pub fn from_model(n: DiversionNotice, now: DateTime<Utc>) -> Self {
        let state = display_state(n.status, n.ends_at, now);
        Self {
            id: n.id,
            road_name: n.road_name,
            reason: n.reason,
            starts_at: n.starts_at,
            ends_at: n.ends_at,
            alternate_route: n.alternate_route,
            priority: n.priority,
            status: n.status,
            display_state: state,
            created_by: n.created_by,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// Request DTO for creating a city route
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Origin must be 1-255 characters"))]
    pub origin: String,

    #[validate(length(min = 1, max = 255, message = "Destination must be 1-255 characters"))]
    pub destination: String,

    #[validate(range(min = 0.1, message = "Distance must be positive"))]
    pub distance_km: f64,

    #[validate(length(max = 1000, message = "Via must not exceed 1000 characters"))]
    pub via: Option<String>,
}

/// Request DTO for updating a city route
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteDto {
    #[validate(length(max = 1000, message = "Via must not exceed 1000 characters"))]
    pub via: Option<String>,

    #[validate(range(min = 0.1, message = "Distance must be positive"))]
    pub distance_km: Option<f64>,

    pub status: Option<RouteStatus>,
}

/// Response DTO for a city route
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponseDto {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Route> for RouteResponseDto {
    fn from(r: Route) -> Self {
        Self {
            id: r.id,
            name: r.name,
            origin: r.origin,
            destination: r.destination,
            distance_km: r.distance_km,
            via: r.via,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

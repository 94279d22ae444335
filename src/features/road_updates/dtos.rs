use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::road_updates::models::{RoadUpdate, RoadUpdateKind, RoadUpdateStatus};

/// Request DTO for posting a road update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoadUpdateDto {
    #[validate(length(min = 1, max = 255, message = "Road name must be 1-255 characters"))]
    pub road_name: String,

    pub kind: RoadUpdateKind,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,
}

/// Request DTO for overwriting a road update in place
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoadUpdateDto {
    pub kind: Option<RoadUpdateKind>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub status: Option<RoadUpdateStatus>,
}

/// Query params for listing road updates
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListRoadUpdatesQuery {
    pub status: Option<RoadUpdateStatus>,
    pub kind: Option<RoadUpdateKind>,
}

/// Response DTO for a road update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadUpdateResponseDto {
    pub id: Uuid,
    pub road_name: String,
    pub kind: RoadUpdateKind,
    pub description: String,
    pub status: RoadUpdateStatus,
    pub reported_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoadUpdate> for RoadUpdateResponseDto {
    fn from(u: RoadUpdate) -> Self {
        Self {
            id: u.id,
            road_name: u.road_name,
            kind: u.kind,
            description: u.description,
            status: u.status,
            reported_by: u.reported_by,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::permits::models::{Permit, PermitStatus};
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::PaginationQuery;

/// Request DTO for applying for a permit
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePermitDto {
    #[validate(length(min = 1, max = 1000, message = "Purpose must be 1-1000 characters"))]
    pub purpose: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    pub start_date: NaiveDate,

    /// Must not be before `startDate`
    pub end_date: NaiveDate,

    #[validate(length(max = 2000, message = "Notes must not exceed 2000 characters"))]
    pub notes: Option<String>,
}

/// Request DTO for a permit decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePermitStatusDto {
    pub status: PermitStatus,

    /// Optional free-text reason recorded on the status trail
    #[validate(length(max = 1000, message = "Reason must not exceed 1000 characters"))]
    pub reason: Option<String>,
}

/// Query params for listing permits
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListPermitsQuery {
    pub status: Option<PermitStatus>,

    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ListPermitsQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for a permit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermitResponseDto {
    pub id: Uuid,
    pub reference_number: String,
    pub applicant_id: String,
    pub purpose: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PermitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Permit> for PermitResponseDto {
    fn from(p: Permit) -> Self {
        Self {
            id: p.id,
            reference_number: p.reference_number,
            applicant_id: p.applicant_id,
            purpose: p.purpose,
            location: p.location,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            notes: p.notes,
            decided_by: p.decided_by,
            decided_at: p.decided_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

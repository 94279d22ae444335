use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Permit status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "permit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermitStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermitStatus::Pending => write!(f, "pending"),
            PermitStatus::Approved => write!(f, "approved"),
            PermitStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Database model for a permit application
#[derive(Debug, Clone, FromRow)]
pub struct Permit {
    pub id: Uuid,
    pub reference_number: String,
    pub applicant_id: String,
    pub purpose: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PermitStatus,
    pub notes: Option<String>,
    pub decided_by: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

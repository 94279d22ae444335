use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Entity kinds that carry a status workflow with history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "workflow_entity_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Report,
    Permit,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Report => write!(f, "report"),
            EntityKind::Permit => write!(f, "permit"),
        }
    }
}

/// Structured admin audit actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "admin_action_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminActionKind {
    ReportReviewed,
    ReportDeleted,
    PermitDecided,
}

/// Append-only status trail entry. Rows are never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct StatusHistoryEntry {
    pub id: Uuid,
    pub entity_kind: EntityKind,
    pub entity_id: Uuid,
    pub old_status: String,
    pub new_status: String,
    pub changed_by: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

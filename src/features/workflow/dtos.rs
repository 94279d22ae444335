use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::workflow::models::{EntityKind, StatusHistoryEntry};

/// Response DTO for one status trail entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryDto {
    pub id: Uuid,
    pub entity_kind: EntityKind,
    pub entity_id: Uuid,
    pub old_status: String,
    pub new_status: String,
    pub changed_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StatusHistoryEntry> for StatusHistoryDto {
    fn from(e: StatusHistoryEntry) -> Self {
        Self {
            id: e.id,
            entity_kind: e.entity_kind,
            entity_id: e.entity_id,
            old_status: e.old_status,
            new_status: e.new_status,
            changed_by: e.changed_by,
            reason: e.reason,
            created_at: e.created_at,
        }
    }
}

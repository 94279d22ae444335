use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response DTO for the current authenticated user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseDto {
    pub user_id: String,
    pub role: String,
}

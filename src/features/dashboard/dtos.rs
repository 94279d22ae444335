use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counts backing the back-office overview page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub reports: ReportCountsDto,
    pub permits: PermitCountsDto,
    pub diversions: DiversionCountsDto,
    pub road_updates: RoadUpdateCountsDto,
    pub signals: SignalCountsDto,
    pub transport: TransportCountsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportCountsDto {
    pub total: i64,
    pub pending: i64,
    pub verified: i64,
    pub invalid: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermitCountsDto {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiversionCountsDto {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadUpdateCountsDto {
    pub total: i64,
    pub active: i64,
    pub resolved: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalCountsDto {
    pub total: i64,
    pub active: i64,
    pub fault: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportCountsDto {
    pub routes: i64,
    pub active_routes: i64,
    pub current_announcements: i64,
}

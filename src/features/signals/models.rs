use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Operational status of a traffic signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "signal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Active,
    Inactive,
    Maintenance,
    Fault,
}

/// Events recorded in the per-signal operational log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "signal_event", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SignalEvent {
    StatusChanged,
    TimingChanged,
    ScheduleAdded,
    FaultReported,
}

/// Database model for a traffic signal
#[derive(Debug, Clone, FromRow)]
pub struct TrafficSignal {
    pub id: Uuid,
    pub intersection: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: SignalStatus,
    pub installed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for a signal operating schedule
#[derive(Debug, Clone, FromRow)]
pub struct SignalSchedule {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub days_of_week: Vec<i16>,
    pub created_at: DateTime<Utc>,
}

/// Database model for the per-signal phase timing, one row per signal
#[derive(Debug, Clone, FromRow)]
pub struct SignalTiming {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub green_secs: i32,
    pub yellow_secs: i32,
    pub red_secs: i32,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Database model for an operational log entry
#[derive(Debug, Clone, FromRow)]
pub struct SignalLog {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub event: SignalEvent,
    pub detail: Option<String>,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

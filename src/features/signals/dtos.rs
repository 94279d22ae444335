use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::signals::models::{
    SignalEvent, SignalLog, SignalSchedule, SignalStatus, SignalTiming, TrafficSignal,
};

/// Request DTO for registering a traffic signal
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignalDto {
    #[validate(length(min = 1, max = 255, message = "Intersection must be 1-255 characters"))]
    pub intersection: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be -90 to 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be -180 to 180"))]
    pub longitude: f64,

    pub installed_on: Option<NaiveDate>,
}

/// Request DTO for changing a signal's operational status
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignalStatusDto {
    pub status: SignalStatus,

    #[validate(length(max = 1000, message = "Detail must not exceed 1000 characters"))]
    pub detail: Option<String>,
}

/// Request DTO for setting the phase timing of a signal
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetTimingDto {
    #[validate(range(min = 1, max = 600, message = "Green phase must be 1-600 seconds"))]
    pub green_secs: i32,

    #[validate(range(min = 1, max = 60, message = "Yellow phase must be 1-60 seconds"))]
    pub yellow_secs: i32,

    #[validate(range(min = 1, max = 600, message = "Red phase must be 1-600 seconds"))]
    pub red_secs: i32,
}

/// Request DTO for adding an operating schedule to a signal
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,

    /// ISO weekday numbers, 1 = Monday through 7 = Sunday
    #[validate(length(min = 1, max = 7, message = "At least one weekday is required"))]
    pub days_of_week: Vec<i16>,
}

/// Query params for listing signals
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListSignalsQuery {
    pub status: Option<SignalStatus>,
}

/// Response DTO for a traffic signal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalResponseDto {
    pub id: Uuid,
    pub intersection: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: SignalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrafficSignal> for SignalResponseDto {
    fn from(s: TrafficSignal) -> Self {
        Self {
            id: s.id,
            intersection: s.intersection,
            latitude: s.latitude,
            longitude: s.longitude,
            status: s.status,
            installed_on: s.installed_on,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Response DTO for a signal's phase timing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimingResponseDto {
    pub signal_id: Uuid,
    pub green_secs: i32,
    pub yellow_secs: i32,
    pub red_secs: i32,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

impl From<SignalTiming> for TimingResponseDto {
    fn from(t: SignalTiming) -> Self {
        Self {
            signal_id: t.signal_id,
            green_secs: t.green_secs,
            yellow_secs: t.yellow_secs,
            red_secs: t.red_secs,
            updated_by: t.updated_by,
            updated_at: t.updated_at,
        }
    }
}

/// Response DTO for a signal operating schedule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponseDto {
    pub id: Uuid,
    pub signal_id: Uuid,
    pub name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub days_of_week: Vec<i16>,
    pub created_at: DateTime<Utc>,
}

impl From<SignalSchedule> for ScheduleResponseDto {
    fn from(s: SignalSchedule) -> Self {
        Self {
            id: s.id,
            signal_id: s.signal_id,
            name: s.name,
            starts_at: s.starts_at,
            ends_at: s.ends_at,
            days_of_week: s.days_of_week,
            created_at: s.created_at,
        }
    }
}

/// Response DTO for an operational log entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalLogDto {
    pub id: Uuid,
    pub event: SignalEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

impl From<SignalLog> for SignalLogDto {
    fn from(l: SignalLog) -> Self {
        Self {
            id: l.id,
            event: l.event,
            detail: l.detail,
            actor: l.actor,
            created_at: l.created_at,
        }
    }
}

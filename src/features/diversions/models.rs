use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored status of a diversion notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "notice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticeStatus {
    Active,
    Inactive,
}

/// Diversion notice priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "notice_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoticePriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Presentation state derived from the stored status and the validity
/// window; never stored, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    Active,
    Expired,
    Inactive,
}

/// Classify a notice for display.
///
/// A notice whose window has ended is expired regardless of its stored
/// status; the `ends_at == now` boundary counts as expired. Active and
/// expired are mutually exclusive by construction.
pub fn display_state(
    status: NoticeStatus,
    ends_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DisplayState {
    if ends_at <= now {
        DisplayState::Expired
    } else if status == NoticeStatus::Active {
        DisplayState::Active
    } else {
        DisplayState::Inactive
    }
}

/// Status of a named city route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "route_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Active,
    Inactive,
}

/// Database model for a diversion notice
#[derive(Debug, Clone, FromRow)]
pub struct DiversionNotice {
    pub id: Uuid,
    pub road_name: String,
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub alternate_route: String,
    pub priority: NoticePriority,
    pub status: NoticeStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for a named city route
#[derive(Debug, Clone, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub via: Option<String>,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn active_notice_within_window_is_active() {
        assert_eq!(
            display_state(NoticeStatus::Active, at(1000), at(500)),
            DisplayState::Active
        );
    }

    #[test]
    fn inactive_notice_within_window_is_inactive() {
        assert_eq!(
            display_state(NoticeStatus::Inactive, at(1000), at(500)),
            DisplayState::Inactive
        );
    }

    #[test]
    fn ended_window_is_expired_regardless_of_status() {
        assert_eq!(
            display_state(NoticeStatus::Active, at(1000), at(2000)),
            DisplayState::Expired
        );
        assert_eq!(
            display_state(NoticeStatus::Inactive, at(1000), at(2000)),
            DisplayState::Expired
        );
    }

    #[test]
    fn boundary_equality_counts_as_expired() {
        assert_eq!(
            display_state(NoticeStatus::Active, at(1000), at(1000)),
            DisplayState::Expired
        );
    }

    #[test]
    fn active_and_expired_are_mutually_exclusive() {
        // Sweep a range of nows around the window end
        for now in 990..1010 {
            let state = display_state(NoticeStatus::Active, at(1000), at(now));
            match state {
                DisplayState::Active => assert!(now < 1000),
                DisplayState::Expired => assert!(now >= 1000),
                DisplayState::Inactive => unreachable!("stored status is active"),
            }
        }
    }
}

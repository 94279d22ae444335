use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::signals::dtos::{
    CreateScheduleDto, CreateSignalDto, ListSignalsQuery, SetTimingDto, UpdateSignalStatusDto,
};
use crate::features::signals::models::{
    SignalEvent, SignalLog, SignalSchedule, SignalTiming, TrafficSignal,
};

const SIGNAL_COLUMNS: &str =
    "id, intersection, latitude, longitude, status, installed_on, created_at, updated_at";

const TIMING_COLUMNS: &str =
    "id, signal_id, green_secs, yellow_secs, red_secs, updated_by, updated_at";

const SCHEDULE_COLUMNS: &str =
    "id, signal_id, name, starts_at, ends_at, days_of_week, created_at";

const LOG_COLUMNS: &str = "id, signal_id, event, detail, actor, created_at";

/// Service for traffic signals, their timings, schedules and event log
pub struct SignalService {
    pool: PgPool,
}

impl SignalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateSignalDto) -> Result<TrafficSignal> {
        let signal = sqlx::query_as::<_, TrafficSignal>(&format!(
            "INSERT INTO traffic_signals (intersection, latitude, longitude, installed_on) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {SIGNAL_COLUMNS}"
        ))
        .bind(&dto.intersection)
        .bind(dto.latitude)
        .bind(dto.longitude)
        .bind(dto.installed_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to register traffic signal: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Traffic signal registered at '{}' ({})",
            signal.intersection,
            signal.id
        );
        Ok(signal)
    }

    pub async fn list(&self, query: &ListSignalsQuery) -> Result<Vec<TrafficSignal>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {SIGNAL_COLUMNS} FROM traffic_signals WHERE 1=1"
        ));
        if let Some(status) = query.status {
            qb.push(" AND status = ").push_bind(status);
        }
        qb.push(" ORDER BY intersection");

        qb.build_query_as::<TrafficSignal>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list traffic signals: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn get(&self, id: Uuid) -> Result<TrafficSignal> {
        let signal = sqlx::query_as::<_, TrafficSignal>(&format!(
            "SELECT {SIGNAL_COLUMNS} FROM traffic_signals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        signal.ok_or_else(|| AppError::NotFound(format!("Traffic signal {} not found", id)))
    }

    /// Direct overwrite plus a log entry, no workflow history
    pub async fn update_status(
        &self,
        id: Uuid,
        actor: &str,
        dto: UpdateSignalStatusDto,
    ) -> Result<TrafficSignal> {
        let mut tx = self.pool.begin().await?;

        let signal = sqlx::query_as::<_, TrafficSignal>(&format!(
            "UPDATE traffic_signals SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SIGNAL_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.status)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Traffic signal {} not found", id)))?;

        let event = match dto.status {
            crate::features::signals::models::SignalStatus::Fault => SignalEvent::FaultReported,
            _ => SignalEvent::StatusChanged,
        };

        sqlx::query(
            "INSERT INTO signal_logs (signal_id, event, detail, actor) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(event)
        .bind(&dto.detail)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Signal {} status set to {:?} by {}",
            id,
            signal.status,
            actor
        );
        Ok(signal)
    }

    /// Upsert, one timing row per signal
    pub async fn set_timing(&self, id: Uuid, actor: &str, dto: SetTimingDto) -> Result<SignalTiming> {
        self.get(id).await?;

        let mut tx = self.pool.begin().await?;

        let timing = sqlx::query_as::<_, SignalTiming>(&format!(
            "INSERT INTO signal_timings (signal_id, green_secs, yellow_secs, red_secs, updated_by) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (signal_id) DO UPDATE SET \
                green_secs = EXCLUDED.green_secs, \
                yellow_secs = EXCLUDED.yellow_secs, \
                red_secs = EXCLUDED.red_secs, \
                updated_by = EXCLUDED.updated_by, \
                updated_at = NOW() \
             RETURNING {TIMING_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.green_secs)
        .bind(dto.yellow_secs)
        .bind(dto.red_secs)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO signal_logs (signal_id, event, detail, actor) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(SignalEvent::TimingChanged)
        .bind(format!(
            "green={}s yellow={}s red={}s",
            dto.green_secs, dto.yellow_secs, dto.red_secs
        ))
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(timing)
    }

    pub async fn get_timing(&self, id: Uuid) -> Result<SignalTiming> {
        self.get(id).await?;

        let timing = sqlx::query_as::<_, SignalTiming>(&format!(
            "SELECT {TIMING_COLUMNS} FROM signal_timings WHERE signal_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        timing.ok_or_else(|| AppError::NotFound(format!("Signal {} has no timing configured", id)))
    }

    pub async fn add_schedule(
        &self,
        id: Uuid,
        actor: &str,
        dto: CreateScheduleDto,
    ) -> Result<SignalSchedule> {
        for day in &dto.days_of_week {
            if !(1..=7).contains(day) {
                return Err(AppError::Validation(format!(
                    "Weekday {} is out of range 1-7",
                    day
                )));
            }
        }

        self.get(id).await?;

        let mut tx = self.pool.begin().await?;

        let schedule = sqlx::query_as::<_, SignalSchedule>(&format!(
            "INSERT INTO signal_schedules (signal_id, name, starts_at, ends_at, days_of_week) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SCHEDULE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(dto.starts_at)
        .bind(dto.ends_at)
        .bind(&dto.days_of_week)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO signal_logs (signal_id, event, detail, actor) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(SignalEvent::ScheduleAdded)
        .bind(&dto.name)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(schedule)
    }

    pub async fn list_schedules(&self, id: Uuid) -> Result<Vec<SignalSchedule>> {
        self.get(id).await?;

        sqlx::query_as::<_, SignalSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM signal_schedules \
             WHERE signal_id = $1 ORDER BY starts_at"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list signal schedules: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Operational log, newest first
    pub async fn logs(&self, id: Uuid) -> Result<Vec<SignalLog>> {
        self.get(id).await?;

        sqlx::query_as::<_, SignalLog>(&format!(
            "SELECT {LOG_COLUMNS} FROM signal_logs \
             WHERE signal_id = $1 ORDER BY created_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list signal logs: {:?}", e);
            AppError::Database(e)
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM traffic_signals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Traffic signal {} not found",
                id
            )));
        }
        tracing::info!("Traffic signal {} deleted", id);
        Ok(())
    }
}

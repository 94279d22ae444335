use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::permits::dtos::{CreatePermitDto, ListPermitsQuery};
use crate::features::permits::models::Permit;
use crate::features::reports::service::format_reference;

const PERMIT_COLUMNS: &str = "id, reference_number, applicant_id, purpose, location, \
     start_date, end_date, status, notes, decided_by, decided_at, created_at, updated_at";

/// Service for permit applications
pub struct PermitService {
    pool: PgPool,
}

impl PermitService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a permit application. An inverted date range is rejected before
    /// anything is stored.
    pub async fn create(&self, applicant_id: &str, dto: CreatePermitDto) -> Result<Permit> {
        validate_date_range(dto.start_date, dto.end_date)?;

        let seq: i64 = sqlx::query_scalar("SELECT nextval('permit_reference_seq')")
            .fetch_one(&self.pool)
            .await?;
        let reference_number = format_reference("PRM", seq);

        let permit = sqlx::query_as::<_, Permit>(&format!(
            "INSERT INTO permits \
             (reference_number, applicant_id, purpose, location, start_date, end_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PERMIT_COLUMNS}"
        ))
        .bind(&reference_number)
        .bind(applicant_id)
        .bind(&dto.purpose)
        .bind(&dto.location)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create permit: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Permit {} filed by {} ({})",
            permit.reference_number,
            applicant_id,
            permit.id
        );
        Ok(permit)
    }

    /// List permits with an optional status filter
    pub async fn list(&self, query: &ListPermitsQuery) -> Result<(Vec<Permit>, i64)> {
        let pagination = query.pagination();
        let limit = pagination.limit();
        let offset = pagination.offset();

        let mut qb = QueryBuilder::new(format!("SELECT {PERMIT_COLUMNS} FROM permits WHERE 1=1"));
        if let Some(status) = query.status {
            qb.push(" AND status = ").push_bind(status);
        }
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let permits = qb
            .build_query_as::<Permit>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list permits: {:?}", e);
                AppError::Database(e)
            })?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM permits WHERE 1=1");
        if let Some(status) = query.status {
            count_qb.push(" AND status = ").push_bind(status);
        }
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((permits, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<Permit> {
        let permit = sqlx::query_as::<_, Permit>(&format!(
            "SELECT {PERMIT_COLUMNS} FROM permits WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        permit.ok_or_else(|| AppError::NotFound(format!("Permit {} not found", id)))
    }
}

/// Permit validity windows must satisfy start <= end; equal dates mean a
/// single-day permit.
fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(AppError::Validation(format!(
            "End date {} is before start date {}",
            end, start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_inverted_date_range() {
        let result = validate_date_range(date(2025, 6, 1), date(2025, 5, 30));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn accepts_single_day_permit() {
        assert!(validate_date_range(date(2025, 6, 1), date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn accepts_ordered_range() {
        assert!(validate_date_range(date(2025, 6, 1), date(2025, 6, 14)).is_ok());
    }
}

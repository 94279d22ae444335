use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::permits::models::{Permit, PermitStatus};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::workflow::models::{AdminActionKind, EntityKind, StatusHistoryEntry};

const REPORT_COLUMNS: &str = "id, reference_number, reporter_id, category, location, \
     occurred_at, description, priority, status, reviewed_by, reviewed_at, \
     created_at, updated_at";

const PERMIT_COLUMNS: &str = "id, reference_number, applicant_id, purpose, location, \
     start_date, end_date, status, notes, decided_by, decided_at, created_at, updated_at";

/// Status workflow shared by reports and permits.
///
/// Every transition updates the entity row, appends a status_history entry
/// and records a structured admin action, all inside one database
/// transaction so the trail can never diverge from the entity state.
///
/// Transitions are deliberately unconstrained: any status is reachable from
/// any other, and a transition to the current status is still performed and
/// still logged.
pub struct WorkflowService {
    pool: PgPool,
}

impl WorkflowService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Transition a report's status, stamping the reviewer
    pub async fn transition_report(
        &self,
        id: Uuid,
        new_status: ReportStatus,
        actor_id: &str,
        reason: Option<&str>,
    ) -> Result<Report> {
        let mut tx = self.pool.begin().await?;

        let old_status = sqlx::query_scalar::<_, ReportStatus>(
            "SELECT status FROM reports WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let report = sqlx::query_as::<_, Report>(&format!(
            "UPDATE reports \
             SET status = $2, reviewed_by = $3, reviewed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status)
        .bind(actor_id)
        .fetch_one(&mut *tx)
        .await?;

        self.append_history(
            &mut tx,
            EntityKind::Report,
            id,
            &old_status.to_string(),
            &new_status.to_string(),
            actor_id,
            reason,
        )
        .await?;

        self.record_admin_action(
            &mut tx,
            actor_id,
            AdminActionKind::ReportReviewed,
            EntityKind::Report,
            id,
            reason,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Report {} transitioned {} -> {} by {}",
            id,
            old_status,
            new_status,
            actor_id
        );
        Ok(report)
    }

    /// Transition a permit's status, stamping the deciding admin
    pub async fn transition_permit(
        &self,
        id: Uuid,
        new_status: PermitStatus,
        actor_id: &str,
        reason: Option<&str>,
    ) -> Result<Permit> {
        let mut tx = self.pool.begin().await?;

        let old_status = sqlx::query_scalar::<_, PermitStatus>(
            "SELECT status FROM permits WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Permit {} not found", id)))?;

        let permit = sqlx::query_as::<_, Permit>(&format!(
            "UPDATE permits \
             SET status = $2, decided_by = $3, decided_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PERMIT_COLUMNS}"
        ))
        .bind(id)
        .bind(new_status)
        .bind(actor_id)
        .fetch_one(&mut *tx)
        .await?;

        self.append_history(
            &mut tx,
            EntityKind::Permit,
            id,
            &old_status.to_string(),
            &new_status.to_string(),
            actor_id,
            reason,
        )
        .await?;

        self.record_admin_action(
            &mut tx,
            actor_id,
            AdminActionKind::PermitDecided,
            EntityKind::Permit,
            id,
            reason,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Permit {} transitioned {} -> {} by {}",
            id,
            old_status,
            new_status,
            actor_id
        );
        Ok(permit)
    }

    /// List the status trail for an entity, newest first
    pub async fn history(&self, kind: EntityKind, entity_id: Uuid) -> Result<Vec<StatusHistoryEntry>> {
        let entries = sqlx::query_as::<_, StatusHistoryEntry>(
            "SELECT id, entity_kind, entity_id, old_status, new_status, changed_by, reason, created_at \
             FROM status_history \
             WHERE entity_kind = $1 AND entity_id = $2 \
             ORDER BY created_at DESC",
        )
        .bind(kind)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list status history: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entries)
    }

    /// Record a structured admin action for an entity outside a transition
    /// (e.g. report deletion)
    pub async fn record_standalone_action(
        &self,
        actor_id: &str,
        action: AdminActionKind,
        target_kind: EntityKind,
        target_id: Uuid,
        reason: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO admin_actions (admin_id, action, target_kind, target_id, reason) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(actor_id)
        .bind(action)
        .bind(target_kind)
        .bind(target_id)
        .bind(reason)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn append_history(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        kind: EntityKind,
        entity_id: Uuid,
        old_status: &str,
        new_status: &str,
        actor_id: &str,
        reason: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO status_history (entity_kind, entity_id, old_status, new_status, changed_by, reason) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(kind)
        .bind(entity_id)
        .bind(old_status)
        .bind(new_status)
        .bind(actor_id)
        .bind(reason)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn record_admin_action(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        actor_id: &str,
        action: AdminActionKind,
        target_kind: EntityKind,
        target_id: Uuid,
        reason: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO admin_actions (admin_id, action, target_kind, target_id, reason) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(actor_id)
        .bind(action)
        .bind(target_kind)
        .bind(target_id)
        .bind(reason)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn seed_report(pool: &PgPool) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO reports \
             (reference_number, reporter_id, category, location, occurred_at, description) \
             VALUES ($1, $2, 'accident', 'Main St & 5th Ave', NOW(), 'Two-car collision') \
             RETURNING id",
        )
        .bind("RPT-900001")
        .bind("reporter-1")
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn seed_permit(pool: &PgPool) -> Uuid {
        sqlx::query_scalar(
            "INSERT INTO permits \
             (reference_number, applicant_id, purpose, location, start_date, end_date) \
             VALUES ($1, $2, 'Street fair', 'Harbor Rd', $3, $4) \
             RETURNING id",
        )
        .bind("PRM-900001")
        .bind("applicant-1")
        .bind(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        .bind(NaiveDate::from_ymd_opt(2026, 9, 3).unwrap())
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn history_rows(pool: &PgPool, kind: &str, id: Uuid) -> Vec<(String, String)> {
        sqlx::query_as(
            "SELECT old_status, new_status FROM status_history \
             WHERE entity_kind = $1::workflow_entity_kind AND entity_id = $2 \
             ORDER BY created_at",
        )
        .bind(kind)
        .bind(id)
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    async fn report_transition_writes_one_history_row(pool: PgPool) {
        let service = WorkflowService::new(pool.clone());
        let id = seed_report(&pool).await;

        let report = service
            .transition_report(id, ReportStatus::Verified, "admin-1", Some("checked on site"))
            .await
            .unwrap();

        assert_eq!(report.status, ReportStatus::Verified);
        assert_eq!(report.reviewed_by.as_deref(), Some("admin-1"));
        assert!(report.reviewed_at.is_some());

        let rows = history_rows(&pool, "report", id).await;
        assert_eq!(rows, vec![("pending".to_string(), "verified".to_string())]);
    }

    #[sqlx::test]
    async fn transition_to_current_status_is_still_logged(pool: PgPool) {
        let service = WorkflowService::new(pool.clone());
        let id = seed_report(&pool).await;

        let report = service
            .transition_report(id, ReportStatus::Pending, "admin-1", None)
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);

        let rows = history_rows(&pool, "report", id).await;
        assert_eq!(rows, vec![("pending".to_string(), "pending".to_string())]);
    }

    #[sqlx::test]
    async fn missing_report_leaves_no_trace(pool: PgPool) {
        let service = WorkflowService::new(pool.clone());

        let result = service
            .transition_report(Uuid::new_v4(), ReportStatus::Invalid, "admin-1", None)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM status_history")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    async fn permit_decision_is_stamped_logged_and_audited(pool: PgPool) {
        let service = WorkflowService::new(pool.clone());
        let id = seed_permit(&pool).await;

        let permit = service
            .transition_permit(id, PermitStatus::Approved, "admin-2", Some("paperwork complete"))
            .await
            .unwrap();

        assert_eq!(permit.status, PermitStatus::Approved);
        assert_eq!(permit.decided_by.as_deref(), Some("admin-2"));
        assert!(permit.decided_at.is_some());

        let rows = history_rows(&pool, "permit", id).await;
        assert_eq!(rows, vec![("pending".to_string(), "approved".to_string())]);

        let actions: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM admin_actions \
             WHERE action = 'permit_decided' AND target_id = $1 AND admin_id = 'admin-2'",
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(actions, 1);
    }
}

use std::sync::Arc;

use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{AttachmentResponseDto, CreateReportDto, ListReportsQuery};
use crate::features::reports::models::{Report, ReportAttachment};
use crate::modules::storage::ObjectStore;

const REPORT_COLUMNS: &str = "id, reference_number, reporter_id, category, location, \
     occurred_at, description, priority, status, reviewed_by, reviewed_at, \
     created_at, updated_at";

const ATTACHMENT_COLUMNS: &str =
    "id, report_id, file_name, content_type, size_bytes, storage_key, created_at";

/// Service for accident/violation reports
pub struct ReportService {
    pool: PgPool,
    store: Arc<ObjectStore>,
}

impl ReportService {
    pub fn new(pool: PgPool, store: Arc<ObjectStore>) -> Self {
        Self { pool, store }
    }

    /// Submit a new report. Reference numbers are sequence-backed and
    /// therefore collision-free.
    pub async fn create(&self, reporter_id: &str, dto: CreateReportDto) -> Result<Report> {
        let seq: i64 = sqlx::query_scalar("SELECT nextval('report_reference_seq')")
            .fetch_one(&self.pool)
            .await?;
        let reference_number = format_reference("RPT", seq);

        let report = sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports \
             (reference_number, reporter_id, category, location, occurred_at, description, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(&reference_number)
        .bind(reporter_id)
        .bind(dto.category)
        .bind(&dto.location)
        .bind(dto.occurred_at)
        .bind(&dto.description)
        .bind(dto.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Report {} created by {} ({})",
            report.reference_number,
            reporter_id,
            report.id
        );
        Ok(report)
    }

    /// List reports with optional status/category/priority filters
    pub async fn list(&self, query: &ListReportsQuery) -> Result<(Vec<Report>, i64)> {
        let pagination = query.pagination();
        let limit = pagination.limit();
        let offset = pagination.offset();

        let mut qb = QueryBuilder::new(format!("SELECT {REPORT_COLUMNS} FROM reports WHERE 1=1"));
        push_filters(&mut qb, query);
        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let reports = qb
            .build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM reports WHERE 1=1");
        push_filters(&mut count_qb, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((reports, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        report.ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Delete a report and its stored photos
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let keys: Vec<String> =
            sqlx::query_scalar("SELECT storage_key FROM report_attachments WHERE report_id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let deleted = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }

        // Attachment rows cascade; object cleanup is best effort
        for key in keys {
            if let Err(e) = self.store.delete_object(&key).await {
                tracing::warn!("Failed to delete attachment object '{}': {}", key, e);
            }
        }

        tracing::info!("Report {} deleted", id);
        Ok(())
    }

    /// Attach a photo to a report. The bytes go to object storage; only
    /// metadata and the storage key land in the database.
    pub async fn add_attachment(
        &self,
        report_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<AttachmentResponseDto> {
        // Reject uploads against unknown reports before touching storage
        self.get(report_id).await?;

        let storage_key = self
            .store
            .put_attachment(report_id, file_name, content_type, data)
            .await?;

        let attachment = sqlx::query_as::<_, ReportAttachment>(&format!(
            "INSERT INTO report_attachments \
             (report_id, file_name, content_type, size_bytes, storage_key) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ATTACHMENT_COLUMNS}"
        ))
        .bind(report_id)
        .bind(file_name)
        .bind(content_type)
        .bind(data.len() as i64)
        .bind(&storage_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record attachment: {:?}", e);
            AppError::Database(e)
        })?;

        let url = self.store.presigned_url(&storage_key).await.ok();
        Ok(AttachmentResponseDto::from_model(attachment, url))
    }

    pub async fn list_attachments(&self, report_id: Uuid) -> Result<Vec<AttachmentResponseDto>> {
        let attachments = sqlx::query_as::<_, ReportAttachment>(&format!(
            "SELECT {ATTACHMENT_COLUMNS} FROM report_attachments \
             WHERE report_id = $1 ORDER BY created_at ASC"
        ))
        .bind(report_id)
        .fetch_all(&self.pool)
        .await?;

        let mut dtos = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            let url = self.store.presigned_url(&attachment.storage_key).await.ok();
            dtos.push(AttachmentResponseDto::from_model(attachment, url));
        }
        Ok(dtos)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, sqlx::Postgres>, query: &ListReportsQuery) {
    if let Some(status) = query.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(category) = query.category {
        qb.push(" AND category = ").push_bind(category);
    }
    if let Some(priority) = query.priority {
        qb.push(" AND priority = ").push_bind(priority);
    }
}

pub(crate) fn format_reference(prefix: &str, seq: i64) -> String {
    format!("{}-{:06}", prefix, seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_numbers_are_prefixed_and_zero_padded() {
        assert_eq!(format_reference("RPT", 7), "RPT-000007");
        assert_eq!(format_reference("PRM", 123456), "PRM-123456");
        assert_eq!(format_reference("PRM", 1234567), "PRM-1234567");
    }
}

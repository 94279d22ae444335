use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// MinIO/S3 client holding report photos.
///
/// The bucket is the single storage location for attachment bytes; the
/// database rows in `report_attachments` carry only metadata and the key.
pub struct ObjectStore {
    bucket: Box<Bucket>,
    attachment_prefix: String,
    presigned_url_expiry_secs: u32,
}

impl ObjectStore {
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Storage(format!("Invalid storage credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        // MinIO requires path-style addressing
        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::Storage(format!("Failed to create bucket handle: {}", e)))?
            .with_path_style();

        Ok(Self {
            bucket,
            attachment_prefix: config.attachment_prefix,
            presigned_url_expiry_secs: config.presigned_url_expiry_secs,
        })
    }

    pub fn bucket_name(&self) -> &str {
        self.bucket.name.as_str()
    }

    /// Create the bucket if it does not exist yet
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        let exists = self
            .bucket
            .exists()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to check bucket: {}", e)))?;

        if exists {
            debug!("Bucket '{}' already exists", self.bucket.name);
            return Ok(());
        }

        Bucket::create_with_path_style(
            &self.bucket.name,
            self.bucket.region.clone(),
            self.bucket.credentials().await.map_err(|e| {
                AppError::Storage(format!("Failed to read bucket credentials: {}", e))
            })?,
            BucketConfiguration::default(),
        )
        .await
        .map_err(|e| AppError::Storage(format!("Failed to create bucket: {}", e)))?;

        info!("Created bucket '{}'", self.bucket.name);
        Ok(())
    }

    /// Upload a report photo, returning the generated storage key
    pub async fn put_attachment(
        &self,
        report_id: Uuid,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let key = format!(
            "{}/{}/{}_{}",
            self.attachment_prefix,
            report_id,
            Uuid::new_v4(),
            sanitize_file_name(file_name)
        );

        self.bucket
            .put_object_with_content_type(&key, data, content_type)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload attachment: {}", e)))?;

        debug!("Uploaded attachment to '{}' ({} bytes)", key, data.len());
        Ok(key)
    }

    pub async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete object: {}", e)))?;
        Ok(())
    }

    /// Time-limited download URL for a stored attachment
    pub async fn presigned_url(&self, key: &str) -> Result<String, AppError> {
        self.bucket
            .presign_get(key, self.presigned_url_expiry_secs, None)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to presign URL: {}", e)))
    }
}

/// Strip path separators and whitespace from client-provided file names
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ' ' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_file_name("a/b\\c d.jpg"), "a_b_c_d.jpg");
        assert_eq!(sanitize_file_name("plain.png"), "plain.png");
    }
}

use chrono::{DateTime, Utc};
use intake_core::models::{Attachment, Upload};
use intake_core::{AppError, StorageBackend};
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

/// Record store for uploaded documents
#[async_trait::async_trait]
pub trait UploadRepository: Send + Sync {
    /// All uploads in insertion order
    async fn list(&self) -> Result<Vec<Upload>, AppError>;

    async fn insert(&self, upload: &Upload) -> Result<Upload, AppError>;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct UploadRow {
    id: Uuid,
    uploader_name: String,
    document_file_name: String,
    document_content_type: String,
    document_file_size: i64,
    document_updated_at: DateTime<Utc>,
    document_storage_key: String,
    document_url: String,
    backend: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UploadRow> for Upload {
    type Error = AppError;

    fn try_from(row: UploadRow) -> Result<Self, Self::Error> {
        let backend = row
            .backend
            .parse::<StorageBackend>()
            .map_err(|e| AppError::Internal(format!("upload {}: {}", row.id, e)))?;

        Ok(Upload {
            id: row.id,
            uploader_name: row.uploader_name,
            document: Attachment {
                file_name: row.document_file_name,
                content_type: row.document_content_type,
                file_size: row.document_file_size,
                updated_at: row.document_updated_at,
                backend,
                storage_key: row.document_storage_key,
                url: row.document_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const UPLOAD_COLUMNS: &str = "id, uploader_name, document_file_name, document_content_type, \
     document_file_size, document_updated_at, document_storage_key, document_url, backend, \
     created_at, updated_at";

/// PostgreSQL upload repository
#[derive(Clone)]
pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UploadRepository for PgUploadRepository {
    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Upload>, AppError> {
        let rows = sqlx::query_as::<Postgres, UploadRow>(&format!(
            "SELECT {} FROM uploads ORDER BY seq ASC",
            UPLOAD_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Upload::try_from).collect()
    }

    #[tracing::instrument(skip(self, upload), fields(db.table = "uploads", db.operation = "insert", db.record_id = %upload.id))]
    async fn insert(&self, upload: &Upload) -> Result<Upload, AppError> {
        let row = sqlx::query_as::<Postgres, UploadRow>(&format!(
            r#"
            INSERT INTO uploads (
                id, uploader_name, document_file_name, document_content_type, document_file_size,
                document_updated_at, document_storage_key, document_url, backend, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            UPLOAD_COLUMNS
        ))
        .bind(upload.id)
        .bind(&upload.uploader_name)
        .bind(&upload.document.file_name)
        .bind(&upload.document.content_type)
        .bind(upload.document.file_size)
        .bind(upload.document.updated_at)
        .bind(&upload.document.storage_key)
        .bind(&upload.document.url)
        .bind(upload.document.backend.to_string())
        .bind(upload.created_at)
        .bind(upload.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Upload::try_from(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads", db.operation = "ping"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

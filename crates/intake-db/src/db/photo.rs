use chrono::{DateTime, Utc};
use intake_core::models::{Attachment, Photo};
use intake_core::{AppError, StorageBackend};
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

/// Record store for photos
#[async_trait::async_trait]
pub trait PhotoRepository: Send + Sync {
    /// All photos in insertion order
    async fn list(&self) -> Result<Vec<Photo>, AppError>;

    /// Persist a fully built photo and return it as stored
    async fn insert(&self, photo: &Photo) -> Result<Photo, AppError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct PhotoRow {
    id: Uuid,
    title: String,
    image_file_name: String,
    image_content_type: String,
    image_file_size: i64,
    image_updated_at: DateTime<Utc>,
    image_storage_key: String,
    image_url: String,
    backend: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PhotoRow> for Photo {
    type Error = AppError;

    fn try_from(row: PhotoRow) -> Result<Self, Self::Error> {
        let backend = row
            .backend
            .parse::<StorageBackend>()
            .map_err(|e| AppError::Internal(format!("photo {}: {}", row.id, e)))?;

        Ok(Photo {
            id: row.id,
            title: row.title,
            image: Attachment {
                file_name: row.image_file_name,
                content_type: row.image_content_type,
                file_size: row.image_file_size,
                updated_at: row.image_updated_at,
                backend,
                storage_key: row.image_storage_key,
                url: row.image_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PHOTO_COLUMNS: &str = "id, title, image_file_name, image_content_type, image_file_size, \
     image_updated_at, image_storage_key, image_url, backend, created_at, updated_at";

/// PostgreSQL photo repository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PhotoRepository for PgPhotoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select"))]
    async fn list(&self) -> Result<Vec<Photo>, AppError> {
        let rows = sqlx::query_as::<Postgres, PhotoRow>(&format!(
            "SELECT {} FROM photos ORDER BY seq ASC",
            PHOTO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Photo::try_from).collect()
    }

    #[tracing::instrument(skip(self, photo), fields(db.table = "photos", db.operation = "insert", db.record_id = %photo.id))]
    async fn insert(&self, photo: &Photo) -> Result<Photo, AppError> {
        let row = sqlx::query_as::<Postgres, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (
                id, title, image_file_name, image_content_type, image_file_size,
                image_updated_at, image_storage_key, image_url, backend, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            PHOTO_COLUMNS
        ))
        .bind(photo.id)
        .bind(&photo.title)
        .bind(&photo.image.file_name)
        .bind(&photo.image.content_type)
        .bind(photo.image.file_size)
        .bind(photo.image.updated_at)
        .bind(&photo.image.storage_key)
        .bind(&photo.image.url)
        .bind(photo.image.backend.to_string())
        .bind(photo.created_at)
        .bind(photo.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Photo::try_from(row)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "ping"))]
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

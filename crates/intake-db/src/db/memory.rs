use intake_core::models::{Photo, Upload};
use intake_core::AppError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::photo::PhotoRepository;
use super::upload::UploadRepository;

/// Process-local record store, used when no database is configured.
///
/// Records are kept in insertion order and lost on restart.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    async fn all(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn push_unique(
        &self,
        record: &T,
        id_of: impl Fn(&T) -> Uuid,
    ) -> Result<T, AppError> {
        let mut records = self.records.write().await;
        let id = id_of(record);
        if records.iter().any(|r| id_of(r) == id) {
            return Err(AppError::Internal(format!("duplicate record id {}", id)));
        }
        records.push(record.clone());
        Ok(record.clone())
    }
}

#[async_trait::async_trait]
impl PhotoRepository for InMemoryRepository<Photo> {
    async fn list(&self) -> Result<Vec<Photo>, AppError> {
        Ok(self.all().await)
    }

    #[tracing::instrument(skip(self, photo), fields(db.table = "photos", db.operation = "insert", db.record_id = %photo.id))]
    async fn insert(&self, photo: &Photo) -> Result<Photo, AppError> {
        self.push_unique(photo, |p| p.id).await
    }
}

#[async_trait::async_trait]
impl UploadRepository for InMemoryRepository<Upload> {
    async fn list(&self) -> Result<Vec<Upload>, AppError> {
        Ok(self.all().await)
    }

    #[tracing::instrument(skip(self, upload), fields(db.table = "uploads", db.operation = "insert", db.record_id = %upload.id))]
    async fn insert(&self, upload: &Upload) -> Result<Upload, AppError> {
        self.push_unique(upload, |u| u.id).await
    }
}

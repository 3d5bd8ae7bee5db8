use chrono::Utc;
use intake_core::models::{Intake, Photo, PhotoForm};
use intake_core::AppError;
use intake_db::PhotoRepository;
use intake_storage::Storage;
use std::sync::Arc;
use uuid::Uuid;

use super::intake::{discard_attachment, store_attachment, PHOTO_IMAGES};

pub type PhotoOutcome = Intake<Photo, PhotoForm>;

/// Accepts photo submissions: validates the image, stores it, records the photo.
#[derive(Clone)]
pub struct PhotoIntake {
    repository: Arc<dyn PhotoRepository>,
    storage: Arc<dyn Storage>,
}

impl PhotoIntake {
    pub fn new(repository: Arc<dyn PhotoRepository>, storage: Arc<dyn Storage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    pub fn repository(&self) -> &Arc<dyn PhotoRepository> {
        &self.repository
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Photo>, AppError> {
        self.repository.list().await
    }

    /// Validate and persist a photo.
    ///
    /// A rejected form comes back untouched with its errors. On success the file
    /// is stored first; if the record insert then fails the file is removed again
    /// and the insert error is returned.
    #[tracing::instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, mut form: PhotoForm) -> Result<PhotoOutcome, AppError> {
        if let Err(errors) = form.validate() {
            tracing::debug!(errors = errors.len(), "Photo rejected");
            return Ok(Intake::Rejected { form, errors });
        }

        let Some(file) = form.image.take() else {
            return Err(AppError::Internal(
                "validated photo has no image".to_string(),
            ));
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        let image = store_attachment(self.storage.as_ref(), PHOTO_IMAGES, id, file, now).await?;
        let photo = form.into_photo(id, image, now);

        match self.repository.insert(&photo).await {
            Ok(stored) => {
                tracing::info!(
                    photo_id = %stored.id,
                    storage_key = %stored.image.storage_key,
                    size_bytes = stored.image.file_size,
                    "Photo created"
                );
                Ok(Intake::Created(stored))
            }
            Err(e) => {
                discard_attachment(self.storage.as_ref(), &photo.image).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{FailingRepository, MemoryStorage};
    use intake_core::models::FileUpload;
    use intake_db::InMemoryRepository;

    fn png() -> Option<FileUpload> {
        Some(FileUpload::new(
            "cat.png",
            Some("image/png".to_string()),
            vec![0x89, 0x50, 0x4e, 0x47],
        ))
    }

    fn intake() -> (PhotoIntake, Arc<InMemoryRepository<Photo>>, Arc<MemoryStorage>) {
        let repo = Arc::new(InMemoryRepository::<Photo>::new());
        let storage = Arc::new(MemoryStorage::default());
        (
            PhotoIntake::new(repo.clone(), storage.clone()),
            repo,
            storage,
        )
    }

    #[tokio::test]
    async fn test_create_capitalizes_title_and_stores_file() {
        let (intake, repo, storage) = intake();

        let photo = intake
            .create(PhotoForm::new("hello", png()))
            .await
            .unwrap()
            .created()
            .unwrap();

        assert_eq!(photo.title, "Hello");
        assert_eq!(photo.image.file_name, "cat.png");
        assert_eq!(photo.image.content_type, "image/png");
        assert_eq!(photo.image.file_size, 4);
        assert_eq!(
            photo.image.storage_key,
            format!("photos/images/{}/original/cat.png", photo.id)
        );
        assert!(storage.contains(&photo.image.storage_key).await);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_with_empty_title() {
        let (intake, _, _) = intake();

        let photo = intake
            .create(PhotoForm::new("", png()))
            .await
            .unwrap()
            .created()
            .unwrap();

        assert_eq!(photo.title, "");
    }

    #[tokio::test]
    async fn test_rejected_photo_persists_nothing() {
        let (intake, repo, storage) = intake();
        let zip = FileUpload::new("x.zip", Some("application/zip".to_string()), vec![1]);

        let outcome = intake
            .create(PhotoForm::new("x", Some(zip)))
            .await
            .unwrap();

        match outcome {
            Intake::Rejected { form, errors } => {
                assert_eq!(form.title, "x");
                assert_eq!(errors.on("image").len(), 1);
            }
            Intake::Created(_) => panic!("zip must not be accepted as an image"),
        }
        assert!(repo.is_empty().await);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_returns_creation_order() {
        let (intake, _, _) = intake();
        for title in ["one", "two", "three"] {
            intake.create(PhotoForm::new(title, png())).await.unwrap();
        }

        let first = intake.list().await.unwrap();
        let second = intake.list().await.unwrap();
        let titles: Vec<&str> = first.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_insert_removes_stored_file() {
        let storage = Arc::new(MemoryStorage::default());
        let intake = PhotoIntake::new(Arc::new(FailingRepository), storage.clone());

        let result = intake.create(PhotoForm::new("hello", png())).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert!(storage.is_empty().await);
        assert_eq!(storage.deletes().await, 1);
    }
}

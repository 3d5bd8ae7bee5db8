use chrono::Utc;
use intake_core::models::{Intake, Upload, UploadForm};
use intake_core::AppError;
use intake_db::UploadRepository;
use intake_storage::Storage;
use std::sync::Arc;
use uuid::Uuid;

use super::intake::{discard_attachment, store_attachment, UPLOAD_DOCUMENTS};

pub type UploadOutcome = Intake<Upload, UploadForm>;

/// Accepts document submissions along with the uploader's name.
#[derive(Clone)]
pub struct DocumentIntake {
    repository: Arc<dyn UploadRepository>,
    storage: Arc<dyn Storage>,
}

impl DocumentIntake {
    pub fn new(repository: Arc<dyn UploadRepository>, storage: Arc<dyn Storage>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    pub fn repository(&self) -> &Arc<dyn UploadRepository> {
        &self.repository
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Upload>, AppError> {
        self.repository.list().await
    }

    #[tracing::instrument(skip(self, form), fields(uploader_name = %form.uploader_name))]
    pub async fn create(&self, mut form: UploadForm) -> Result<UploadOutcome, AppError> {
        if let Err(errors) = form.validate() {
            tracing::debug!(errors = errors.len(), "Document rejected");
            return Ok(Intake::Rejected { form, errors });
        }

        let Some(file) = form.document.take() else {
            return Err(AppError::Internal(
                "validated upload has no document".to_string(),
            ));
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        let document =
            store_attachment(self.storage.as_ref(), UPLOAD_DOCUMENTS, id, file, now).await?;
        let upload = form.into_upload(id, document, now);

        match self.repository.insert(&upload).await {
            Ok(stored) => {
                tracing::info!(
                    upload_id = %stored.id,
                    storage_key = %stored.document.storage_key,
                    size_bytes = stored.document.file_size,
                    "Document created"
                );
                Ok(Intake::Created(stored))
            }
            Err(e) => {
                discard_attachment(self.storage.as_ref(), &upload.document).await;
                Err(e)
            }
        }
    }
}

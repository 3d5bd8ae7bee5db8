//! Service initialization and application state setup

use crate::services::{DocumentIntake, PhotoIntake};
use crate::state::AppState;
use intake_core::models::{Photo, Upload};
use intake_core::Config;
use intake_db::{
    InMemoryRepository, PgPhotoRepository, PgUploadRepository, PhotoRepository,
    UploadRepository,
};
use intake_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Wire repositories and storage into the intake services.
pub fn initialize_services(
    config: &Config,
    pool: Option<PgPool>,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let persistent_records = pool.is_some();

    let (photo_repository, upload_repository): (
        Arc<dyn PhotoRepository>,
        Arc<dyn UploadRepository>,
    ) = match pool {
        Some(pool) => (
            Arc::new(PgPhotoRepository::new(pool.clone())),
            Arc::new(PgUploadRepository::new(pool)),
        ),
        None => (
            Arc::new(InMemoryRepository::<Photo>::new()),
            Arc::new(InMemoryRepository::<Upload>::new()),
        ),
    };

    tracing::info!(
        record_store = if persistent_records { "postgres" } else { "memory" },
        "Intake services initialized"
    );

    Arc::new(AppState {
        config: config.clone(),
        photos: PhotoIntake::new(photo_repository, storage.clone()),
        documents: DocumentIntake::new(upload_repository, storage.clone()),
        storage,
        persistent_records,
    })
}

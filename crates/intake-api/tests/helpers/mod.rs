//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p intake-api`. Records live in memory and
//! files in a temporary directory, so no external services are needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use intake_api::services::{DocumentIntake, PhotoIntake};
use intake_api::setup::routes;
use intake_api::state::AppState;
use intake_core::config::{BaseConfig, IntakeConfig};
use intake_core::models::{Photo, Upload};
use intake_core::{AppError, Config, StorageBackend};
use intake_db::{InMemoryRepository, PhotoRepository, UploadRepository};
use intake_storage::{LocalStorage, Storage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A tiny PNG signature; content is never inspected, only the declared type.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%test\n";

/// Test application: server plus the owned storage directory.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Every regular file under the storage directory.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.push(path);
                }
            }
        }

        let mut files = Vec::new();
        walk(self.temp_dir.path(), &mut files);
        files
    }
}

pub fn create_test_config(storage_path: &Path, max_upload_size_bytes: usize) -> Config {
    Config(Box::new(IntakeConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        database_url: None,
        db_max_connections: 5,
        db_timeout_seconds: 30,
        storage_backend: StorageBackend::Local,
        local_storage_path: storage_path.display().to_string(),
        local_storage_base_url: "/system".to_string(),
        max_upload_size_bytes,
    }))
}

/// Setup test app with in-memory records and local storage in a temp dir.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(
        Arc::new(InMemoryRepository::<Photo>::new()),
        Arc::new(InMemoryRepository::<Upload>::new()),
        50 * 1024 * 1024,
    )
    .await
}

pub async fn setup_test_app_with(
    photo_repository: Arc<dyn PhotoRepository>,
    upload_repository: Arc<dyn UploadRepository>,
    max_upload_size_bytes: usize,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(temp_dir.path(), max_upload_size_bytes);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path(), config.local_storage_base_url().to_string())
            .await
            .expect("Failed to create local storage"),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        photos: PhotoIntake::new(photo_repository, storage.clone()),
        documents: DocumentIntake::new(upload_repository, storage.clone()),
        storage,
        persistent_records: false,
    });

    let router = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, temp_dir }
}

pub fn photo_form(title: &str, file_name: &str, mime_type: &str, data: &'static [u8]) -> MultipartForm {
    MultipartForm::new().add_text("title", title.to_string()).add_part(
        "image",
        Part::bytes(data).file_name(file_name.to_string()).mime_type(mime_type.to_string()),
    )
}

pub fn upload_form(
    uploader_name: &str,
    file_name: &str,
    mime_type: &str,
    data: &'static [u8],
) -> MultipartForm {
    MultipartForm::new()
        .add_text("uploader_name", uploader_name.to_string())
        .add_part(
            "document",
            Part::bytes(data)
                .file_name(file_name.to_string())
                .mime_type(mime_type.to_string()),
        )
}

/// Record store whose inserts always fail, for exercising the compensating delete.
pub struct FailingRepository;

#[async_trait]
impl PhotoRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Photo>, AppError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _photo: &Photo) -> Result<Photo, AppError> {
        Err(AppError::Internal("insert refused".to_string()))
    }
}

#[async_trait]
impl UploadRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Upload>, AppError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _upload: &Upload) -> Result<Upload, AppError> {
        Err(AppError::Internal("insert refused".to_string()))
    }
}

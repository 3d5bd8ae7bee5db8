//! Intake DB Library
//!
//! Record stores for photos and uploads: PostgreSQL repositories for deployments
//! and an in-memory repository for development and tests.

pub mod db;

pub use db::{
    InMemoryRepository, PgPhotoRepository, PgUploadRepository, PhotoRepository,
    UploadRepository,
};

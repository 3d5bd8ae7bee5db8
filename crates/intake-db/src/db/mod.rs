//! Database repositories for data access layer
//!
//! Each record type has a repository trait with a PostgreSQL implementation.
//! [`InMemoryRepository`] implements both traits over a process-local list.

pub mod memory;
pub mod photo;
pub mod upload;

pub use memory::InMemoryRepository;
pub use photo::{PgPhotoRepository, PhotoRepository};
pub use upload::{PgUploadRepository, UploadRepository};

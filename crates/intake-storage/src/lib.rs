//! Intake Storage Library
//!
//! This crate provides the file storage abstraction used for photo images and
//! uploaded documents, with a local filesystem implementation.
//!
//! # Storage key format
//!
//! Every attachment is stored under
//! `{resource}/{attribute}/{record_id}/original/{file_name}`, for example
//! `photos/images/2f0c.../original/cat.png`. Key generation lives in the `keys`
//! module so all callers agree on the layout.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use intake_core::StorageBackend;
pub use keys::attachment_key;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};

//! Data models for the application
//!
//! Photos and uploads (documents) are two structurally identical record types, each
//! owning the metadata of one attached file.

mod attachment;
mod intake;
mod photo;
mod upload;

pub use attachment::*;
pub use intake::*;
pub use photo::*;
pub use upload::*;

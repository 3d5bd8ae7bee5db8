//! Intake services: validation, file storage and record persistence per entity.

pub mod document_intake;
pub mod intake;
pub mod photo_intake;

pub use document_intake::{DocumentIntake, UploadOutcome};
pub use intake::{AttachmentSlot, PHOTO_IMAGES, UPLOAD_DOCUMENTS};
pub use photo_intake::{PhotoIntake, PhotoOutcome};

//! Attachment handling shared by the photo and document intakes.

use chrono::{DateTime, Utc};
use intake_core::models::{Attachment, FileUpload};
use intake_core::AppError;
use intake_storage::{attachment_key, Storage};
use uuid::Uuid;

use crate::error::storage_error;
use crate::utils::upload::sanitize_filename;

/// Where a record type keeps its attachment: `{resource}/{attribute}/...`.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentSlot {
    pub resource: &'static str,
    pub attribute: &'static str,
}

pub const PHOTO_IMAGES: AttachmentSlot = AttachmentSlot {
    resource: "photos",
    attribute: "images",
};

pub const UPLOAD_DOCUMENTS: AttachmentSlot = AttachmentSlot {
    resource: "uploads",
    attribute: "documents",
};

/// Write a validated file to storage under the record's key and describe it.
pub(crate) async fn store_attachment(
    storage: &dyn Storage,
    slot: AttachmentSlot,
    record_id: Uuid,
    file: FileUpload,
    now: DateTime<Utc>,
) -> Result<Attachment, AppError> {
    let file_name = sanitize_filename(&file.file_name);
    let content_type = file.declared_content_type();
    let file_size = file.size() as i64;
    let storage_key = attachment_key(slot.resource, slot.attribute, record_id, &file_name);

    let url = storage
        .upload_with_key(&storage_key, file.data, &content_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, storage_key = %storage_key, "Failed to store attachment");
            storage_error(e)
        })?;

    Ok(Attachment {
        file_name,
        content_type,
        file_size,
        updated_at: now,
        backend: storage.backend_type(),
        storage_key,
        url,
    })
}

/// Remove a stored file whose record could not be persisted.
///
/// Failures are logged and swallowed; the caller reports the original error.
pub(crate) async fn discard_attachment(storage: &dyn Storage, attachment: &Attachment) {
    match storage.delete(&attachment.storage_key).await {
        Ok(()) => tracing::warn!(
            storage_key = %attachment.storage_key,
            "Removed stored file after failed record insert"
        ),
        Err(e) => tracing::error!(
            error = %e,
            storage_key = %attachment.storage_key,
            "Failed to remove orphaned file after failed record insert"
        ),
    }
}

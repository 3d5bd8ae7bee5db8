use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage_types::StorageBackend;
use crate::validation::{normalize_content_type, DEFAULT_CONTENT_TYPE};

/// A file as received from the client, before validation.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    /// Content type declared by the client for the file part, if any.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Normalized declared content type, `application/octet-stream` when none was sent.
    pub fn declared_content_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(normalize_content_type)
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Reference to a stored file plus the metadata derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub updated_at: DateTime<Utc>,
    pub backend: StorageBackend,
    pub storage_key: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentResponse {
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub url: String,
}

impl From<Attachment> for AttachmentResponse {
    fn from(attachment: Attachment) -> Self {
        AttachmentResponse {
            file_name: attachment.file_name,
            content_type: attachment.content_type,
            file_size: attachment.file_size,
            url: attachment.url,
        }
    }
}

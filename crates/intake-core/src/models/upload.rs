use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attachment::{Attachment, AttachmentResponse, FileUpload};
use crate::validation::{validate_attachment, ValidationErrors, DOCUMENT_CONTENT_TYPES};

/// Attribute key the document rules report against.
pub const UPLOAD_DOCUMENT_ATTRIBUTE: &str = "document";

/// An uploaded document and the name of whoever sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: Uuid,
    pub uploader_name: String,
    pub document: Attachment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub uploader_name: String,
    pub document: Option<FileUpload>,
}

impl UploadForm {
    pub fn new(uploader_name: impl Into<String>, document: Option<FileUpload>) -> Self {
        Self {
            uploader_name: uploader_name.into(),
            document,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_attachment(
            UPLOAD_DOCUMENT_ATTRIBUTE,
            self.document.as_ref(),
            DOCUMENT_CONTENT_TYPES,
        ) {
            errors.push(e);
        }
        errors.into_result()
    }

    pub fn into_upload(self, id: Uuid, document: Attachment, now: DateTime<Utc>) -> Upload {
        Upload {
            id,
            uploader_name: self.uploader_name,
            document,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub uploader_name: String,
    pub document: AttachmentResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Upload> for UploadResponse {
    fn from(upload: Upload) -> Self {
        UploadResponse {
            id: upload.id,
            uploader_name: upload.uploader_name,
            document: upload.document.into(),
            created_at: upload.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadFormResponse {
    pub uploader_name: String,
    pub document: Option<String>,
    pub accepted_content_types: &'static [&'static str],
}

impl From<&UploadForm> for UploadFormResponse {
    fn from(form: &UploadForm) -> Self {
        UploadFormResponse {
            uploader_name: form.uploader_name.clone(),
            document: form.document.as_ref().map(|f| f.file_name.clone()),
            accepted_content_types: DOCUMENT_CONTENT_TYPES,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attachment::{Attachment, AttachmentResponse, FileUpload};
use crate::validation::{validate_attachment, ValidationErrors, PHOTO_CONTENT_TYPES};

/// Attribute key the image rules report against.
pub const PHOTO_IMAGE_ATTRIBUTE: &str = "image";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub image: Attachment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Photo candidate as submitted.
#[derive(Debug, Clone, Default)]
pub struct PhotoForm {
    pub title: String,
    pub image: Option<FileUpload>,
}

impl PhotoForm {
    pub fn new(title: impl Into<String>, image: Option<FileUpload>) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) =
            validate_attachment(PHOTO_IMAGE_ATTRIBUTE, self.image.as_ref(), PHOTO_CONTENT_TYPES)
        {
            errors.push(e);
        }
        errors.into_result()
    }

    /// Build the record to persist. The title is capitalized here, once, right before storage.
    pub fn into_photo(self, id: Uuid, image: Attachment, now: DateTime<Utc>) -> Photo {
        Photo {
            id,
            title: capitalize(&self.title),
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Uppercase the first character and keep the rest as is. Empty input stays empty.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub title: String,
    pub image: AttachmentResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        PhotoResponse {
            id: photo.id,
            title: photo.title,
            image: photo.image.into(),
            created_at: photo.created_at,
        }
    }
}

/// Form state rendered for a new or rejected photo.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoFormResponse {
    pub title: String,
    pub image: Option<String>,
    pub accepted_content_types: &'static [&'static str],
}

impl From<&PhotoForm> for PhotoFormResponse {
    fn from(form: &PhotoForm) -> Self {
        PhotoFormResponse {
            title: form.title.clone(),
            image: form.image.as_ref().map(|f| f.file_name.clone()),
            accepted_content_types: PHOTO_CONTENT_TYPES,
        }
    }
}

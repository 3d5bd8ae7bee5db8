//! Common utilities for file upload handlers

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use intake_core::models::FileUpload;
use intake_core::AppError;
use std::collections::HashMap;

const MAX_FILENAME_LENGTH: usize = 255;

/// Text fields and file parts of a submitted form.
#[derive(Debug, Default)]
pub struct SubmittedForm {
    fields: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl SubmittedForm {
    /// Text value of a field; an absent field reads as the empty string.
    pub fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}

/// Read every part of a multipart form.
///
/// Parts carrying a filename are files, everything else is text. A file input
/// submitted without a selection (empty filename, no bytes) counts as absent.
/// Only one file per field name is accepted.
pub async fn read_multipart_form(mut multipart: Multipart) -> Result<SubmittedForm, AppError> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field.file_name().map(|s| s.to_string()) {
            Some(file_name) => {
                if form.files.contains_key(&field_name) {
                    return Err(AppError::BadRequest(format!(
                        "Multiple files are not allowed for field '{}'",
                        field_name
                    )));
                }
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await.map_err(multipart_error)?;

                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                tracing::debug!(
                    field = %field_name,
                    file_name = %file_name,
                    content_type = ?content_type,
                    size_bytes = data.len(),
                    "Received file part"
                );
                form.files.insert(
                    field_name,
                    FileUpload::new(file_name, content_type, data.to_vec()),
                );
            }
            None => {
                let value = field.text().await.map_err(multipart_error)?;
                form.fields.insert(field_name, value);
            }
        }
    }

    Ok(form)
}

/// Sanitize a client-supplied file name for use in a storage key.
///
/// Directory components are dropped, anything outside `[A-Za-z0-9._-]` becomes `_`
/// and consecutive dots collapse to one.
/// Names with nothing usable left fall back to `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let mut sanitized = String::with_capacity(filename_only.len().min(MAX_FILENAME_LENGTH));
    for c in filename_only.chars() {
        if sanitized.len() >= MAX_FILENAME_LENGTH {
            break;
        }
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            c
        } else {
            '_'
        };
        // Storage keys may never contain "..", so dot runs collapse to one.
        if c == '.' && sanitized.ends_with('.') {
            continue;
        }
        sanitized.push(c);
    }

    if sanitized.chars().all(|c| c == '.' || c == '_') {
        return "file".to_string();
    }

    sanitized
}

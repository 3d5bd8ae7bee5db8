//! Declared content type allow-lists.
//!
//! Only the MIME type the client declared for the file part is checked; file contents
//! are never inspected.

use super::ValidationError;
use crate::models::FileUpload;

/// Content type assumed for a file part that declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content types accepted for a photo's image.
pub const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpg", "image/jpeg", "image/png", "image/gif"];

/// Content types accepted for an uploaded document.
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Strip parameters and lowercase ("Text/Plain; charset=utf-8" -> "text/plain").
pub fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Check that `file` is present and declares one of `allowed`.
pub fn validate_attachment(
    attribute: &'static str,
    file: Option<&FileUpload>,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    let Some(file) = file else {
        return Err(ValidationError::new(attribute, "must be attached"));
    };

    let content_type = file.declared_content_type();
    if !allowed.contains(&content_type.as_str()) {
        return Err(ValidationError::new(
            attribute,
            format!(
                "has an unsupported content type ({}). Allowed types: {}",
                content_type,
                allowed.join(", ")
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: Option<&str>) -> FileUpload {
        FileUpload::new("file.bin", content_type.map(String::from), b"data".to_vec())
    }

    #[test]
    fn normalize_strips_parameters_and_case() {
        assert_eq!(normalize_content_type("Text/Plain; charset=utf-8"), "text/plain");
        assert_eq!(normalize_content_type(" image/PNG "), "image/png");
    }

    #[test]
    fn every_photo_type_is_accepted() {
        for content_type in PHOTO_CONTENT_TYPES {
            assert!(
                validate_attachment("image", Some(&file(Some(content_type))), PHOTO_CONTENT_TYPES)
                    .is_ok(),
                "{content_type} should be accepted"
            );
        }
    }

    #[test]
    fn every_document_type_is_accepted() {
        for content_type in DOCUMENT_CONTENT_TYPES {
            assert!(validate_attachment(
                "document",
                Some(&file(Some(content_type))),
                DOCUMENT_CONTENT_TYPES
            )
            .is_ok());
        }
    }

    #[test]
    fn photo_types_are_not_documents() {
        let err = validate_attachment(
            "document",
            Some(&file(Some("image/png"))),
            DOCUMENT_CONTENT_TYPES,
        )
        .unwrap_err();
        assert_eq!(err.attribute, "document");
        assert!(err.message.contains("image/png"));
    }

    #[test]
    fn zip_is_rejected_for_photos() {
        let err = validate_attachment(
            "image",
            Some(&file(Some("application/zip"))),
            PHOTO_CONTENT_TYPES,
        )
        .unwrap_err();
        assert_eq!(err.attribute, "image");
        assert!(err.message.contains("unsupported content type"));
    }

    #[test]
    fn missing_content_type_falls_back_to_octet_stream() {
        let err = validate_attachment("image", Some(&file(None)), PHOTO_CONTENT_TYPES).unwrap_err();
        assert!(err.message.contains(DEFAULT_CONTENT_TYPE));
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = validate_attachment("image", None, PHOTO_CONTENT_TYPES).unwrap_err();
        assert_eq!(err.message, "must be attached");
    }

    #[test]
    fn parameters_do_not_bypass_the_allow_list() {
        assert!(validate_attachment(
            "document",
            Some(&file(Some("text/plain; charset=utf-8"))),
            DOCUMENT_CONTENT_TYPES
        )
        .is_ok());
        assert!(validate_attachment(
            "document",
            Some(&file(Some("text/html; x=text/plain"))),
            DOCUMENT_CONTENT_TYPES
        )
        .is_err());
    }
}

//! Shared key generation for stored attachments.

use uuid::Uuid;

/// Generate the storage key of an attachment.
///
/// `resource` is the plural record name (`photos`, `uploads`) and `attribute` the
/// plural attachment name (`images`, `documents`). The file name is expected to be
/// sanitized already.
pub fn attachment_key(resource: &str, attribute: &str, record_id: Uuid, file_name: &str) -> String {
    format!("{}/{}/{}/original/{}", resource, attribute, record_id, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            attachment_key("photos", "images", id, "cat.png"),
            "photos/images/00000000-0000-0000-0000-000000000000/original/cat.png"
        );
    }

    #[test]
    fn test_distinct_records_never_share_keys() {
        let a = attachment_key("uploads", "documents", Uuid::new_v4(), "report.pdf");
        let b = attachment_key("uploads", "documents", Uuid::new_v4(), "report.pdf");
        assert_ne!(a, b);
    }
}

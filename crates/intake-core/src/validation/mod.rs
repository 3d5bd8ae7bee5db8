//! Validation modules
//!
//! Attachment rules are statically declared per entity type and report failures as
//! `ValidationError` values instead of faults.

pub mod content_type;

use std::collections::BTreeMap;

pub use content_type::{
    normalize_content_type, validate_attachment, DEFAULT_CONTENT_TYPE, DOCUMENT_CONTENT_TYPES,
    PHOTO_CONTENT_TYPES,
};

/// A failed rule on a single attribute of a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{attribute} {message}")]
pub struct ValidationError {
    pub attribute: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(attribute: &'static str, message: impl Into<String>) -> Self {
        Self {
            attribute,
            message: message.into(),
        }
    }
}

/// All rule failures collected for one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Messages recorded against `attribute`, in the order the rules ran.
    pub fn on(&self, attribute: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.attribute == attribute)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Messages grouped by attribute, for rendering next to form fields.
    pub fn to_map(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.attribute)
                .or_default()
                .push(error.message.clone());
        }
        map
    }

    /// `Ok(())` when no rule failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

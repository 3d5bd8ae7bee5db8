pub mod files;
pub mod photos;
pub mod uploads;

use serde::Serialize;

/// One-shot notice shown after a redirect.
#[derive(Debug, Serialize)]
pub struct Flash {
    pub success: &'static str,
}

//! Application state shared by all handlers.

use crate::services::{DocumentIntake, PhotoIntake};
use intake_core::Config;
use intake_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub photos: PhotoIntake,
    pub documents: DocumentIntake,
    pub storage: Arc<dyn Storage>,
    /// `true` when the records live in PostgreSQL rather than process memory.
    pub persistent_records: bool,
}

impl AppState {
    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }
}

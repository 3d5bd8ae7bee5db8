//! Intake API Library
//!
//! This crate provides the HTTP handlers, intake services, middleware, and
//! application setup for the photo and document intake service.

// Module declarations
mod handlers;
mod middleware;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{DocumentIntake, PhotoIntake};
pub use state::AppState;

//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors so they become
//! `HttpAppError` and render consistently (status, body, logging).
//!
//! Rejected attachments are not errors here: handlers render them as a 422 form
//! response themselves.

use axum::{
    extract::multipart::MultipartRejection,
    extract::{FromRequest, Multipart, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{AppError, ErrorMetadata, LogLevel};
use intake_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Reduce file size")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from intake-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Convert multipart extraction failures (wrong content type, broken boundary,
/// body over the limit) into our ErrorResponse format.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        let body_text = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return HttpAppError(AppError::PayloadTooLarge(body_text));
        }
        HttpAppError(AppError::BadRequest(format!(
            "Invalid multipart body: {}",
            body_text
        )))
    }
}

/// Multipart extractor that returns our ErrorResponse format (400 + JSON) when the
/// request is not a readable multipart body.
pub struct ValidatedMultipart(pub Multipart);

impl<S> FromRequest<S> for ValidatedMultipart
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedMultipart(multipart))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

fn error_response(app_error: &AppError, is_production: bool) -> ErrorResponse {
    // Details only leave the process outside production, and never for sensitive errors.
    let show_details = !is_production && !app_error.is_sensitive();

    ErrorResponse {
        error: app_error.client_message(),
        details: show_details.then(|| app_error.detailed_message()),
        error_type: show_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(error_response(app_error, is_production_env()));

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

/// Map a storage failure onto the service-wide error type.
pub fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::NotFound(msg) => AppError::NotFound(msg),
        StorageError::UploadFailed(msg) => AppError::Storage(msg),
        StorageError::DownloadFailed(msg) => AppError::Storage(msg),
        StorageError::DeleteFailed(msg) => AppError::Storage(msg),
        StorageError::InvalidKey(msg) => AppError::BadRequest(msg),
        StorageError::BackendError(msg) => AppError::Storage(msg),
        StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        StorageError::ConfigError(msg) => AppError::Internal(msg),
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_not_found_maps_to_404() {
        let err = HttpAppError::from(StorageError::NotFound("photos/x".to_string()));
        assert_eq!(err.0.http_status_code(), 404);
    }

    #[test]
    fn test_storage_invalid_key_maps_to_400() {
        let err = HttpAppError::from(StorageError::InvalidKey("..".to_string()));
        assert_eq!(err.0.error_code(), "BAD_REQUEST");
    }

    #[test]
    fn test_storage_write_failure_is_sensitive() {
        let err = storage_error(StorageError::UploadFailed("disk full".to_string()));
        let body = error_response(&err, false);
        assert_eq!(body.code, "STORAGE_ERROR");
        assert_eq!(body.error, "Failed to access storage");
        assert!(body.details.is_none());
        assert!(body.recoverable);
    }

    #[test]
    fn test_details_hidden_in_production() {
        let err = AppError::BadRequest("Invalid multipart body: missing boundary".to_string());

        let dev = error_response(&err, false);
        assert!(dev.details.is_some());
        assert_eq!(dev.error_type.as_deref(), Some("BadRequest"));

        let prod = error_response(&err, true);
        assert!(prod.details.is_none());
        assert!(prod.error_type.is_none());
        assert_eq!(prod.code, "BAD_REQUEST");
    }

    #[test]
    fn test_into_response_status() {
        let response = HttpAppError(AppError::PayloadTooLarge("too big".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}

//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Storage,
//! conversion and extractor errors convert into `HttpAppError` with `?`, so every failure is
//! translated to a status code and body in exactly one place.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mdconvert_core::{AppError, ErrorMetadata, LogLevel};
use mdconvert_processing::ConversionError;
use mdconvert_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of the failure
    pub detail: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from mdconvert-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Form bodies that fail to deserialize are a client error.
impl From<FormRejection> for HttpAppError {
    fn from(rejection: FormRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid form body: {}",
            rejection.body_text()
        )))
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid multipart body: {}",
            rejection.body_text()
        )))
    }
}

/// A body that trips the request size limit surfaces as a multipart read error with status 413.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("File too large".to_string())
        } else {
            AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            detail: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            err @ StorageError::AlreadyExists(_) => AppError::Conflict(err.to_string()),
            StorageError::InvalidName(msg) => AppError::InvalidInput(msg),
            StorageError::WriteFailed(msg) => AppError::Internal(msg),
            StorageError::ReadFailed(msg) => AppError::Internal(msg),
            StorageError::DeleteFailed(msg) => AppError::Internal(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        };
        HttpAppError(app)
    }
}

/// Translate a gateway outcome for the file the client knows as `display_name`.
pub fn conversion_error(err: ConversionError, display_name: &str) -> HttpAppError {
    let app = match err {
        ConversionError::Failed(msg) => AppError::ConversionFailed(msg),
        ConversionError::NoResult | ConversionError::EmptyOutput => {
            AppError::EmptyOutput(format!("Unable to convert file: {}", display_name))
        }
    };
    HttpAppError(app)
}

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use mdconvert_core::constants::MARKDOWN_CONTENT_TYPE;
use mdconvert_core::AppError;
use mdconvert_storage::sanitize_filename;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// RFC 5987 `attr-char` minus the rarely used symbols.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// `Content-Disposition` value that stays a valid header for any file name.
///
/// The quoted `filename` is an ASCII fallback with quotes, backslashes, control and
/// non-ASCII characters replaced by `_`; `filename*` carries the exact name.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(name, FILENAME_ENCODE_SET)
    )
}

#[utoipa::path(
    get,
    path = "/download/{filename}",
    tag = "converted",
    params(
        ("filename" = String, Path, description = "Name of a file in the converted directory")
    ),
    responses(
        (status = 200, description = "Markdown file", content_type = "text/markdown"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, HttpAppError> {
    let name = sanitize_filename(&filename);
    if name.is_empty() {
        return Err(AppError::InvalidInput("Invalid filename".to_string()).into());
    }

    let (file, stream) = state.converted.open_stream(&name).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, MARKDOWN_CONTENT_TYPE)
        .header(header::CONTENT_DISPOSITION, content_disposition(&file.name))
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| {
            HttpAppError::from(AppError::Internal(format!(
                "Failed to build response: {}",
                e
            )))
        })
}

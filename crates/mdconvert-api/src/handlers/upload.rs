use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_upload;
use axum::extract::{multipart::MultipartRejection, Multipart, State};
use axum::Json;
use mdconvert_core::models::{UploadResponse, STATUS_SUCCESS};
use mdconvert_core::AppError;
use mdconvert_storage::sanitize_filename;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(content_type = "multipart/form-data", description = "Form with a single `file` part"),
    responses(
        (status = 200, description = "File stored in the uploads directory", body = UploadResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 409, description = "A file with this name already exists", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let upload = extract_multipart_upload(multipart?).await?;

    let filename = sanitize_filename(&upload.file_name);
    if filename.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()).into());
    }

    let stored = state.uploads.put(&filename, upload.data).await?;

    tracing::info!(
        path = %stored.path.display(),
        size_bytes = stored.size_bytes,
        "File uploaded"
    );

    Ok(Json(UploadResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "File uploaded successfully".to_string(),
        filename: stored.name,
        file_path: stored.path.display().to_string(),
        file_size: stored.size_bytes,
    }))
}

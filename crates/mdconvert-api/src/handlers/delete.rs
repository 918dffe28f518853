use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use mdconvert_core::models::{DeleteResponse, STATUS_SUCCESS};
use mdconvert_core::AppError;
use mdconvert_storage::sanitize_filename;
use std::sync::Arc;

/// Delete a converted Markdown file. Uploads are never touched.
#[utoipa::path(
    delete,
    path = "/delete/{filename}",
    tag = "converted",
    params(
        ("filename" = String, Path, description = "Name of a file in the converted directory")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeleteResponse),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, HttpAppError> {
    let name = sanitize_filename(&filename);
    if name.is_empty() {
        return Err(AppError::InvalidInput("Invalid filename".to_string()).into());
    }

    state.converted.remove(&name).await?;
    tracing::info!(file_name = %name, "Converted file deleted");

    Ok(Json(DeleteResponse {
        status: STATUS_SUCCESS.to_string(),
        message: format!("File {} deleted successfully", name),
    }))
}

//! Directory listings

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use futures::TryStreamExt;
use mdconvert_core::models::{
    ConvertedFileEntry, ConvertedListResponse, UploadListResponse, UploadedFileEntry,
};
use mdconvert_storage::StoredFile;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/list-uploads",
    tag = "uploads",
    responses(
        (status = 200, description = "Files in the uploads directory", body = UploadListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UploadListResponse>, HttpAppError> {
    let files: Vec<StoredFile> = state.uploads.list().try_collect().await?;

    let entries = files
        .into_iter()
        .map(|file| UploadedFileEntry {
            convert_url: format!("/convert-by-filename/{}", file.name),
            size: file.size_bytes,
            modified: file.modified_epoch_secs(),
            filename: file.name,
        })
        .collect();

    Ok(Json(UploadListResponse::new(entries)))
}

#[utoipa::path(
    get,
    path = "/list-converted",
    tag = "converted",
    responses(
        (status = 200, description = "Markdown files in the converted directory", body = ConvertedListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_converted(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConvertedListResponse>, HttpAppError> {
    let files: Vec<StoredFile> = state.converted.list().try_collect().await?;

    let entries = files
        .into_iter()
        .map(|file| ConvertedFileEntry {
            download_url: format!("/download/{}", file.name),
            size: file.size_bytes,
            modified: file.modified_epoch_secs(),
            filename: file.name,
        })
        .collect();

    Ok(Json(ConvertedListResponse::new(entries)))
}

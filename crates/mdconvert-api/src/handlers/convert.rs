//! Conversion endpoints.
//!
//! `POST /convert-by-filename` and `GET /convert-by-filename/{file_name}` read a file
//! that was uploaded earlier; `POST /convert` converts the bytes submitted with the
//! request without keeping them.

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::conversion::{convert_submitted_file, convert_uploaded_file};
use crate::state::AppState;
use crate::utils::form::ConvertForm;
use crate::utils::upload::extract_multipart_upload;
use axum::extract::{multipart::MultipartRejection, Multipart, Path, Query, State};
use axum::Json;
use mdconvert_core::models::{ConversionResponse, ConvertByFilenameForm, OutputFilenameQuery};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/convert-by-filename",
    tag = "conversion",
    request_body(
        content = ConvertByFilenameForm,
        content_type = "application/x-www-form-urlencoded",
        description = "Name of a file in the uploads directory and an optional output name"
    ),
    responses(
        (status = 200, description = "File converted", body = ConversionResponse),
        (status = 400, description = "No file_name provided", body = ErrorResponse),
        (status = 404, description = "File not found in uploads directory", body = ErrorResponse),
        (status = 422, description = "Conversion failed or produced no text", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, form), fields(operation = "convert_by_filename"))]
pub async fn convert_by_filename(
    State(state): State<Arc<AppState>>,
    ConvertForm(form): ConvertForm,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    let response =
        convert_uploaded_file(&state, &form.file_name, form.output_filename.as_deref()).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/convert-by-filename/{file_name}",
    tag = "conversion",
    params(
        ("file_name" = String, Path, description = "Name of a file in the uploads directory"),
        OutputFilenameQuery
    ),
    responses(
        (status = 200, description = "File converted", body = ConversionResponse),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "File not found in uploads directory", body = ErrorResponse),
        (status = 422, description = "Conversion failed or produced no text", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "convert_by_filename_get"))]
pub async fn convert_by_filename_get(
    State(state): State<Arc<AppState>>,
    Path(file_name): Path<String>,
    Query(query): Query<OutputFilenameQuery>,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    let response =
        convert_uploaded_file(&state, &file_name, query.output_filename.as_deref()).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/convert",
    tag = "conversion",
    request_body(
        content_type = "multipart/form-data",
        description = "Form with a `file` part and an optional `output_filename` field"
    ),
    responses(
        (status = 200, description = "File converted", body = ConversionResponse),
        (status = 400, description = "No file provided", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 422, description = "Conversion failed or produced no text", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "convert_upload"))]
pub async fn convert_upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConversionResponse>, HttpAppError> {
    let upload = extract_multipart_upload(multipart?).await?;
    let response = convert_submitted_file(
        &state,
        &upload.file_name,
        upload.data,
        upload.output_filename.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

//! Conversion workflows shared by the conversion endpoints.
//!
//! The POST form and GET path variants of filename based conversion both call
//! [`convert_uploaded_file`], so they behave identically.

use bytes::Bytes;
use mdconvert_core::models::{ConversionMetadata, ConversionResponse, STATUS_SUCCESS};
use mdconvert_core::AppError;
use mdconvert_storage::{sanitize_filename, ConversionIdentity, StoredFile};

use crate::error::{conversion_error, HttpAppError};
use crate::state::AppState;

fn conversion_response(
    original_filename: String,
    identity: &ConversionIdentity,
    output: &StoredFile,
    input_path: Option<String>,
    length: usize,
) -> ConversionResponse {
    ConversionResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "File converted successfully".to_string(),
        original_filename,
        converted_filename: output.name.clone(),
        input_path,
        output_path: output.path.display().to_string(),
        file_size: length,
        metadata: ConversionMetadata {
            original_extension: identity.original_extension().to_string(),
            conversion_id: identity.token().to_string(),
        },
    }
}

/// Convert a file that already sits in the uploads directory.
pub async fn convert_uploaded_file(
    state: &AppState,
    file_name: &str,
    output_filename: Option<&str>,
) -> Result<ConversionResponse, HttpAppError> {
    let file_name = sanitize_filename(file_name);
    if file_name.is_empty() {
        return Err(AppError::InvalidInput("No file_name provided".to_string()).into());
    }

    let input = state.uploads.get(&file_name).await?;
    tracing::info!(file_name = %file_name, "Converting uploaded file");

    let identity = ConversionIdentity::generate(&file_name);
    let result = state
        .gateway
        .convert(&input.path)
        .await
        .map_err(|e| conversion_error(e, &file_name))?;

    let output_name = identity.output_name(output_filename);
    let output = state
        .converted
        .put(&output_name, result.text_content)
        .await?;

    tracing::info!(
        path = %output.path.display(),
        conversion_id = identity.token(),
        "Converted file saved"
    );

    Ok(conversion_response(
        file_name,
        &identity,
        &output,
        Some(input.path.display().to_string()),
        result.length,
    ))
}

/// Convert bytes submitted with the request.
///
/// The bytes are held under a token-prefixed name in the uploads directory only for
/// the duration of the conversion; the temporary file is gone on every exit path.
pub async fn convert_submitted_file(
    state: &AppState,
    original_name: &str,
    data: Bytes,
    output_filename: Option<&str>,
) -> Result<ConversionResponse, HttpAppError> {
    let original_name = sanitize_filename(original_name);
    if original_name.is_empty() {
        return Err(AppError::InvalidInput("No file provided".to_string()).into());
    }

    tracing::info!(file_name = %original_name, size_bytes = data.len(), "Converting submitted file");

    let identity = ConversionIdentity::generate(&original_name);
    let temporary = state
        .uploads
        .put_temporary(&identity, &original_name, data)
        .await?;

    let outcome = state.gateway.convert(temporary.path()).await;
    if let Err(e) = temporary.remove().await {
        tracing::warn!(error = %e, "Failed to remove temporary upload");
    }
    let result = outcome.map_err(|e| conversion_error(e, &original_name))?;

    let output_name = identity.output_name(output_filename);
    let output = state
        .converted
        .put(&output_name, result.text_content)
        .await?;

    tracing::info!(
        path = %output.path.display(),
        conversion_id = identity.token(),
        "Converted file saved"
    );

    Ok(conversion_response(
        original_name,
        &identity,
        &output,
        None,
        result.length,
    ))
}

//! Common utilities for file upload handlers

use axum::extract::Multipart;
use bytes::Bytes;
use mdconvert_core::AppError;

use crate::error::HttpAppError;

/// Fields read from an upload form.
#[derive(Debug)]
pub struct MultipartUpload {
    /// Client supplied name, not yet sanitized
    pub file_name: String,
    pub data: Bytes,
    pub output_filename: Option<String>,
}

/// Extract the `file` part and the optional `output_filename` field.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_upload(
    mut multipart: Multipart,
) -> Result<MultipartUpload, HttpAppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut output_filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    )
                    .into());
                }
                let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let data = field.bytes().await?;
                file = Some((file_name, data));
            }
            "output_filename" => {
                output_filename = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (file_name, data) = file
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    Ok(MultipartUpload {
        file_name,
        data,
        output_filename,
    })
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub filename: String,
    pub file_path: String,
    pub file_size: u64,
}

/// One entry of `GET /list-uploads`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileEntry {
    pub filename: String,
    pub size: u64,
    /// Seconds since the Unix epoch
    pub modified: f64,
    pub convert_url: String,
}

/// One entry of `GET /list-converted`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertedFileEntry {
    pub filename: String,
    pub size: u64,
    /// Seconds since the Unix epoch
    pub modified: f64,
    pub download_url: String,
}

/// Body of `GET /list-uploads`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadListResponse {
    pub status: String,
    pub files: Vec<UploadedFileEntry>,
    pub total_files: usize,
}

impl UploadListResponse {
    pub fn new(files: Vec<UploadedFileEntry>) -> Self {
        Self {
            status: super::STATUS_SUCCESS.to_string(),
            total_files: files.len(),
            files,
        }
    }
}

/// Body of `GET /list-converted`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertedListResponse {
    pub status: String,
    pub files: Vec<ConvertedFileEntry>,
    pub total_files: usize,
}

impl ConvertedListResponse {
    pub fn new(files: Vec<ConvertedFileEntry>) -> Self {
        Self {
            status: super::STATUS_SUCCESS.to_string(),
            total_files: files.len(),
            files,
        }
    }
}

/// Body of `DELETE /delete/{filename}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub status: String,
    pub message: String,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionMetadata {
    /// Extension of the submitted file including the dot, or empty
    pub original_extension: String,
    /// Token generated for this conversion
    pub conversion_id: String,
}

/// Body of every conversion endpoint.
///
/// `input_path` is only present when an already uploaded file was converted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub status: String,
    pub message: String,
    pub original_filename: String,
    pub converted_filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    pub output_path: String,
    /// Length of the Markdown text in characters
    pub file_size: usize,
    pub metadata: ConversionMetadata,
}

/// Form body of `POST /convert-by-filename`, also the query of the GET variant.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ConvertByFilenameForm {
    #[serde(default)]
    pub file_name: String,
    pub output_filename: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OutputFilenameQuery {
    pub output_filename: Option<String>,
}

//! OpenAPI documentation.
//! Served at `/api/openapi.json` and rendered with RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use mdconvert_core::models;

/// Returns the OpenAPI spec served by the API.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "mdconvert API",
        version = "0.1.0",
        description = "Upload files, convert them to Markdown and manage the converted output. Uploaded files live in the uploads directory; Markdown output lives in the converted directory."
    ),
    paths(
        // Service
        handlers::info::root,
        handlers::health::health_check,
        handlers::health::liveness_check,
        // Uploads
        handlers::upload::upload_file,
        handlers::files::list_uploads,
        // Conversion
        handlers::convert::convert_by_filename,
        handlers::convert::convert_by_filename_get,
        handlers::convert::convert_upload,
        // Converted files
        handlers::files::list_converted,
        handlers::download::download_file,
        handlers::delete::delete_file,
    ),
    components(
        schemas(
            // Service models
            models::InfoResponse,
            models::DirectoriesExist,
            models::HealthResponse,
            models::DirectoriesHealth,
            models::DirectoryHealth,
            models::UserInfo,
            models::LivenessResponse,
            // File models
            models::UploadResponse,
            models::UploadedFileEntry,
            models::UploadListResponse,
            models::ConvertedFileEntry,
            models::ConvertedListResponse,
            models::DeleteResponse,
            // Conversion models
            models::ConvertByFilenameForm,
            models::ConversionResponse,
            models::ConversionMetadata,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "service", description = "Service information and health checks"),
        (name = "uploads", description = "Upload files and list the uploads directory"),
        (name = "conversion", description = "Convert uploaded or submitted files to Markdown"),
        (name = "converted", description = "List, download and delete converted Markdown files")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = get_openapi_spec();
        for path in [
            "/",
            "/health",
            "/live",
            "/upload",
            "/list-uploads",
            "/convert-by-filename",
            "/convert-by-filename/{file_name}",
            "/convert",
            "/download/{filename}",
            "/list-converted",
            "/delete/{filename}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}

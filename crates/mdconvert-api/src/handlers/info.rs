use crate::state::AppState;
use axum::{extract::State, Json};
use mdconvert_core::models::{DirectoriesExist, InfoResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service information", body = InfoResponse)
    )
)]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    let uploads = state.uploads.root();
    let converted = state.converted.root();

    Json(InfoResponse {
        message: "Markdown conversion API is running".to_string(),
        upload_dir: uploads.display().to_string(),
        converted_dir: converted.display().to_string(),
        directories_exist: DirectoriesExist {
            uploads: tokio::fs::try_exists(uploads).await.unwrap_or(false),
            converted: tokio::fs::try_exists(converted).await.unwrap_or(false),
        },
    })
}

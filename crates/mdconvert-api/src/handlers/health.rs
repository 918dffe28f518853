//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, Json};
use mdconvert_core::models::{
    DirectoriesHealth, DirectoryHealth, HealthResponse, LivenessResponse, UserInfo,
};
use std::path::Path;
use std::sync::Arc;

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    nix::unistd::access(path, nix::unistd::AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(unix)]
fn process_ids() -> (u32, u32) {
    (
        nix::unistd::getuid().as_raw(),
        nix::unistd::getgid().as_raw(),
    )
}

#[cfg(not(unix))]
fn process_ids() -> (u32, u32) {
    (0, 0)
}

async fn probe_directory(path: &Path) -> std::io::Result<DirectoryHealth> {
    let exists = tokio::fs::try_exists(path).await?;
    Ok(DirectoryHealth {
        path: path.display().to_string(),
        exists,
        writable: exists && is_writable(path),
    })
}

async fn probe(state: &AppState) -> std::io::Result<HealthResponse> {
    let directories = DirectoriesHealth {
        upload_dir: probe_directory(state.uploads.root()).await?,
        converted_dir: probe_directory(state.converted.root()).await?,
    };

    let (uid, gid) = process_ids();
    let user_info = UserInfo {
        uid,
        gid,
        pid: std::process::id(),
        hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
    };

    Ok(HealthResponse::healthy(directories, user_info))
}

/// Full health check: directory existence and writability plus process identity.
///
/// Always answers 200; a failed probe is reported in the body.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses(
        (status = 200, description = "Health report", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    match probe(&state).await {
        Ok(response) => Json(response),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Json(HealthResponse::unhealthy(e.to_string()))
        }
    }
}

/// Liveness probe - process is running.
#[utoipa::path(
    get,
    path = "/live",
    tag = "service",
    responses(
        (status = 200, description = "Process is alive", body = LivenessResponse)
    )
)]
pub async fn liveness_check() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

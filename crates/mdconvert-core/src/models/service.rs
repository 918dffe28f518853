use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Existence flags for the two managed directories.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectoriesExist {
    pub uploads: bool,
    pub converted: bool,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub message: String,
    pub upload_dir: String,
    pub converted_dir: String,
    pub directories_exist: DirectoriesExist,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectoryHealth {
    pub path: String,
    pub exists: bool,
    pub writable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectoriesHealth {
    pub upload_dir: DirectoryHealth,
    pub converted_dir: DirectoryHealth,
}

/// Identity of the serving process.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    pub uid: u32,
    pub gid: u32,
    pub pid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// Body of `GET /health`.
///
/// A failed probe still answers with this shape: `status` becomes `"unhealthy"`,
/// `error` carries the reason and the probe fields are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directories: Option<DirectoriesHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn healthy(directories: DirectoriesHealth, user_info: UserInfo) -> Self {
        Self {
            status: "healthy".to_string(),
            directories: Some(directories),
            user_info: Some(user_info),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            directories: None,
            user_info: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
}

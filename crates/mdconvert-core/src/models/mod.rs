//! Data models for the application
//!
//! This module contains the JSON bodies returned by the HTTP service, organized by
//! feature area. Every type derives `ToSchema` so the OpenAPI document stays in sync
//! with what the handlers actually serialize.

mod conversion;
mod files;
mod service;

// Re-export all models for convenient imports
pub use conversion::*;
pub use files::*;
pub use service::*;

/// Value of the `status` field on every successful response.
pub const STATUS_SUCCESS: &str = "success";

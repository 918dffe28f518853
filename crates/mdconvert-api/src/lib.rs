//! mdconvert API Library
//!
//! This crate provides the HTTP handlers, error mapping and application setup for the
//! file to Markdown conversion service.

// Module declarations
mod api_doc;
mod handlers;
mod services;
pub mod setup;
pub mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;

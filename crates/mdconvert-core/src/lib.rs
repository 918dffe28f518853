//! mdconvert Core Library
//!
//! This crate provides the configuration, error taxonomy and API models shared by
//! the storage, processing and HTTP crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ConverterBackend, ConverterServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};

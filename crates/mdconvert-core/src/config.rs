//! Configuration module
//!
//! This module provides configuration structures for the conversion service. Values
//! are resolved once at process startup and then passed into each component, so no
//! request handler reads process-wide environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{DEFAULT_CONVERTED_DIR, DEFAULT_UPLOAD_DIR};

// Common constants
const SERVER_PORT: u16 = 5000;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Which converter implementation the conversion gateway drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConverterBackend {
    /// The `markitdown` command line tool
    MarkItDown,
    /// In-process conversion for text-like formats and PDF
    Native,
}

impl FromStr for ConverterBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markitdown" => Ok(ConverterBackend::MarkItDown),
            "native" => Ok(ConverterBackend::Native),
            other => Err(anyhow::anyhow!(
                "Unknown CONVERTER_BACKEND '{}'. Expected 'markitdown' or 'native'",
                other
            )),
        }
    }
}

impl std::fmt::Display for ConverterBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverterBackend::MarkItDown => write!(f, "markitdown"),
            ConverterBackend::Native => write!(f, "native"),
        }
    }
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub log_format: String,
}

/// Conversion service configuration
#[derive(Clone, Debug)]
pub struct ConverterServiceConfig {
    pub base: BaseConfig,
    pub upload_dir: PathBuf,
    pub converted_dir: PathBuf,
    pub converter_backend: ConverterBackend,
    pub markitdown_path: String,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ConverterServiceConfig>);

impl Config {
    fn as_service(&self) -> &ConverterServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ConverterServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Configuration rooted at the given directories with every other value at its default.
    pub fn with_directories(upload_dir: impl Into<PathBuf>, converted_dir: impl Into<PathBuf>) -> Self {
        Config(Box::new(ConverterServiceConfig {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                log_format: "compact".to_string(),
            },
            upload_dir: upload_dir.into(),
            converted_dir: converted_dir.into(),
            converter_backend: ConverterBackend::MarkItDown,
            markitdown_path: "markitdown".to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
        }))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_service().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_service().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.as_service().base.log_format
    }

    pub fn upload_dir(&self) -> &Path {
        &self.as_service().upload_dir
    }

    pub fn converted_dir(&self) -> &Path {
        &self.as_service().converted_dir
    }

    pub fn converter_backend(&self) -> ConverterBackend {
        self.as_service().converter_backend
    }

    pub fn markitdown_path(&self) -> &str {
        &self.as_service().markitdown_path
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_service().max_upload_size_bytes
    }
}

impl ConverterServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "compact".to_string())
                .to_lowercase(),
        };

        let converter_backend = env::var("CONVERTER_BACKEND")
            .unwrap_or_else(|_| "markitdown".to_string())
            .parse::<ConverterBackend>()?;

        Ok(ConverterServiceConfig {
            base,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            converted_dir: env::var("CONVERTED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONVERTED_DIR)),
            converter_backend,
            markitdown_path: env::var("MARKITDOWN_PATH")
                .unwrap_or_else(|_| "markitdown".to_string()),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let environment = self.base.environment.to_lowercase();
        let is_production = environment == "production" || environment == "prod";
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_DIR cannot be empty"));
        }
        if self.converted_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CONVERTED_DIR cannot be empty"));
        }
        if self.upload_dir == self.converted_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_DIR and CONVERTED_DIR must be different directories"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.converter_backend == ConverterBackend::MarkItDown
            && self.markitdown_path.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "MARKITDOWN_PATH cannot be empty when CONVERTER_BACKEND=markitdown"
            ));
        }

        if !matches!(self.base.log_format.as_str(), "compact" | "json") {
            return Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'compact' or 'json', got '{}'",
                self.base.log_format
            ));
        }

        Ok(())
    }
}

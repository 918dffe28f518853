//! Conversion gateway

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use mdconvert_core::{Config, ConverterBackend};
use thiserror::Error;

use crate::markitdown::MarkItDownConverter;
use crate::native::NativeConverter;
use crate::traits::Converter;

/// Markdown produced for one file. `text_content` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub text_content: String,
    /// Length of `text_content` in characters
    pub length: usize,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{0}")]
    Failed(String),

    #[error("converter returned no result")]
    NoResult,

    #[error("converter returned empty text")]
    EmptyOutput,
}

/// Invokes the configured converter exactly once per call. No retries, no timeout.
#[derive(Clone)]
pub struct ConversionGateway {
    converter: Arc<dyn Converter>,
}

impl std::fmt::Debug for ConversionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionGateway")
            .field("converter", &self.converter.name())
            .finish()
    }
}

impl ConversionGateway {
    pub fn new(converter: Arc<dyn Converter>) -> Self {
        Self { converter }
    }

    /// Build the gateway for the backend selected in configuration.
    pub fn from_config(config: &Config) -> Self {
        let converter: Arc<dyn Converter> = match config.converter_backend() {
            ConverterBackend::MarkItDown => {
                Arc::new(MarkItDownConverter::new(config.markitdown_path()))
            }
            ConverterBackend::Native => Arc::new(NativeConverter::new()),
        };
        Self::new(converter)
    }

    pub fn backend_name(&self) -> &'static str {
        self.converter.name()
    }

    pub async fn convert(&self, path: &Path) -> Result<ConversionResult, ConversionError> {
        let start = Instant::now();

        let output = match self.converter.convert(path).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    backend = self.converter.name(),
                    error = %e,
                    "Conversion failed"
                );
                return Err(ConversionError::Failed(format!("{:#}", e)));
            }
        };

        let text_content = match output {
            None => {
                tracing::warn!(path = %path.display(), "Converter returned no result");
                return Err(ConversionError::NoResult);
            }
            Some(output) if output.text_content.is_empty() => {
                tracing::warn!(path = %path.display(), "Converter returned empty text");
                return Err(ConversionError::EmptyOutput);
            }
            Some(output) => output.text_content,
        };

        let length = text_content.chars().count();

        tracing::info!(
            path = %path.display(),
            backend = self.converter.name(),
            length,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "File converted successfully"
        );

        Ok(ConversionResult {
            text_content,
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ConverterOutput;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedConverter {
        output: Option<&'static str>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FixedConverter {
        fn new(output: Option<&'static str>, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                output,
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Converter for FixedConverter {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn convert(&self, _path: &Path) -> anyhow::Result<Option<ConverterOutput>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("unsupported format");
            }
            Ok(self.output.map(ConverterOutput::new))
        }
    }

    #[tokio::test]
    async fn test_convert_success_counts_characters() {
        let converter = FixedConverter::new(Some("héllo"), false);
        let gateway = ConversionGateway::new(converter.clone());

        let result = gateway.convert(Path::new("a.txt")).await.unwrap();
        assert_eq!(result.text_content, "héllo");
        assert_eq!(result.length, 5);
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_convert_empty_and_missing_output() {
        let empty = ConversionGateway::new(FixedConverter::new(Some(""), false));
        assert!(matches!(
            empty.convert(Path::new("a.txt")).await,
            Err(ConversionError::EmptyOutput)
        ));

        let missing = ConversionGateway::new(FixedConverter::new(None, false));
        assert!(matches!(
            missing.convert(Path::new("a.txt")).await,
            Err(ConversionError::NoResult)
        ));
    }

    #[tokio::test]
    async fn test_convert_failure_is_not_retried() {
        let converter = FixedConverter::new(Some("ignored"), true);
        let gateway = ConversionGateway::new(converter.clone());

        let err = gateway.convert(Path::new("a.bin")).await.unwrap_err();
        assert_eq!(err.to_string(), "unsupported format");
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_config_selects_backend() {
        let mut config = Config::with_directories("/tmp/u", "/tmp/c");
        assert_eq!(ConversionGateway::from_config(&config).backend_name(), "markitdown");

        config.0.converter_backend = ConverterBackend::Native;
        assert_eq!(ConversionGateway::from_config(&config).backend_name(), "native");
    }
}

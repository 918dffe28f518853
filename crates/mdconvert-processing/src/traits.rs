//! Converter abstraction trait

use std::path::Path;

use async_trait::async_trait;

/// Text produced by a converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOutput {
    pub text_content: String,
}

impl ConverterOutput {
    pub fn new(text_content: impl Into<String>) -> Self {
        Self {
            text_content: text_content.into(),
        }
    }
}

/// A document-to-Markdown converter.
///
/// `Ok(None)` means the converter ran but had nothing to return. An empty
/// `text_content` is reported as such rather than folded into `None`.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    async fn convert(&self, path: &Path) -> anyhow::Result<Option<ConverterOutput>>;
}

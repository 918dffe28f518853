//! Converter backed by the `markitdown` command line tool

use std::path::Path;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tokio::process::Command;

use crate::traits::{Converter, ConverterOutput};

/// Runs `markitdown <file>` and takes its standard output as the Markdown text.
pub struct MarkItDownConverter {
    binary: String,
}

impl MarkItDownConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl Converter for MarkItDownConverter {
    fn name(&self) -> &'static str {
        "markitdown"
    }

    async fn convert(&self, path: &Path) -> anyhow::Result<Option<ConverterOutput>> {
        tracing::debug!(binary = %self.binary, path = %path.display(), "Running markitdown");

        let output = Command::new(&self.binary)
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| anyhow!("Failed to run {}: {}", self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, "markitdown failed: {}", stderr.trim());
            return Err(anyhow!("markitdown failed ({}): {}", output.status, stderr.trim()));
        }

        let text = String::from_utf8(output.stdout).context("markitdown produced invalid UTF-8")?;
        Ok(Some(ConverterOutput::new(text)))
    }
}

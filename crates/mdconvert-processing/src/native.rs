//! In-process converter for plain text formats and PDF

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use crate::traits::{Converter, ConverterOutput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NativeFormat {
    Text,
    Delimited(char),
    Json,
    Html,
    Pdf,
}

impl NativeFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "txt" | "md" | "markdown" | "log" | "rst" => Some(NativeFormat::Text),
            "csv" => Some(NativeFormat::Delimited(',')),
            "tsv" => Some(NativeFormat::Delimited('\t')),
            "json" => Some(NativeFormat::Json),
            "html" | "htm" => Some(NativeFormat::Html),
            "pdf" => Some(NativeFormat::Pdf),
            _ => None,
        }
    }
}

/// Converter that needs no external tooling.
///
/// Text-like files pass through, delimited files become a Markdown table, JSON and
/// HTML are wrapped in fenced code blocks and PDF text is extracted with
/// `pdf-extract`. Any other extension is rejected. An empty input file yields no
/// result.
#[derive(Debug, Default)]
pub struct NativeConverter;

impl NativeConverter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Converter for NativeConverter {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn convert(&self, path: &Path) -> Result<Option<ConverterOutput>> {
        let format = NativeFormat::from_path(path).ok_or_else(|| {
            anyhow!(
                "Unsupported file type: {}",
                path.extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_else(|| "(no extension)".to_string())
            )
        })?;

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if metadata.len() == 0 {
            return Ok(None);
        }

        let text = match format {
            NativeFormat::Text => read_text(path).await?,
            NativeFormat::Delimited(delimiter) => {
                delimited_to_table(&read_text(path).await?, delimiter)
            }
            NativeFormat::Json => json_to_code_block(&read_text(path).await?)?,
            NativeFormat::Html => fenced("html", read_text(path).await?.trim_end()),
            NativeFormat::Pdf => extract_pdf(path).await?,
        };

        Ok(Some(ConverterOutput::new(text)))
    }
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))
}

fn fenced(language: &str, body: &str) -> String {
    format!("```{}\n{}\n```\n", language, body)
}

fn json_to_code_block(raw: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Invalid JSON document")?;
    let pretty = serde_json::to_string_pretty(&value)?;
    Ok(fenced("json", &pretty))
}

/// Split one delimited line, honouring double-quoted fields with `""` escapes.
fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn table_cell(field: &str) -> String {
    field.trim().replace('|', "\\|")
}

fn delimited_to_table(raw: &str, delimiter: char) -> String {
    let rows: Vec<Vec<String>> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_record(line, delimiter))
        .collect();

    let Some(width) = rows.iter().map(Vec::len).max() else {
        return String::new();
    };

    let mut table = String::new();
    for (index, row) in rows.iter().enumerate() {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(|f| table_cell(f)).unwrap_or_default())
            .collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
        if index == 0 {
            table.push_str(&format!("|{}\n", " --- |".repeat(width)));
        }
    }
    table
}

#[cfg(feature = "pdf")]
async fn extract_pdf(path: &Path) -> Result<String> {
    let owned = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
        .await
        .context("PDF extraction task failed")?
        .map_err(|e| anyhow!("PDF text extraction failed: {}", e))?;

    tracing::debug!(text_len = text.len(), "PDF text extracted");
    Ok(text.trim().to_string())
}

#[cfg(not(feature = "pdf"))]
async fn extract_pdf(_path: &Path) -> Result<String> {
    Err(anyhow!("PDF support is not enabled in this build"))
}

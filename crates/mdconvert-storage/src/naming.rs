//! File naming rules shared by both stores.
//!
//! Externally supplied names pass through [`sanitize_filename`] before any filesystem
//! access. Output and temporary names for a conversion come from a
//! [`ConversionIdentity`].

use mdconvert_core::constants::{CONVERSION_TOKEN_LEN, MARKDOWN_EXTENSION};
use uuid::Uuid;

/// Reduce any client supplied name to its final path segment.
///
/// Both `/` and `\` count as separators. Traversal markers (`.` and `..`) and
/// names ending in a separator reduce to the empty string, which callers reject.
pub fn sanitize_filename(raw: &str) -> String {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or("");
    match last {
        "." | ".." => String::new(),
        name => name.to_string(),
    }
}

/// Split a name at its last dot: `a.tar.gz` becomes (`a.tar`, `.gz`).
///
/// A leading dot does not start an extension, so `.bashrc` has none.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Identity of a single conversion: a short random token plus the stem and
/// extension of the submitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionIdentity {
    token: String,
    stem: String,
    extension: String,
}

impl ConversionIdentity {
    /// Generate a fresh identity for `original_name`.
    pub fn generate(original_name: &str) -> Self {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(CONVERSION_TOKEN_LEN)
            .collect();
        Self::with_token(token, original_name)
    }

    pub fn with_token(token: impl Into<String>, original_name: &str) -> Self {
        let (stem, extension) = split_extension(original_name);
        Self {
            token: token.into(),
            stem: stem.to_string(),
            extension: extension.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension of the original name including the dot, or `""`.
    pub fn original_extension(&self) -> &str {
        &self.extension
    }

    /// Name of the Markdown file this conversion writes.
    ///
    /// A non-empty override (after sanitization) is used verbatim with `.md`
    /// appended. Otherwise the name is `{stem}_{token}.md`.
    pub fn output_name(&self, output_override: Option<&str>) -> String {
        match output_override.map(sanitize_filename) {
            Some(name) if !name.is_empty() => format!("{}{}", name, MARKDOWN_EXTENSION),
            _ => format!("{}_{}{}", self.stem, self.token, MARKDOWN_EXTENSION),
        }
    }

    /// Name used to hold an uploaded file in the uploads directory while it is converted.
    pub fn temp_upload_name(&self, original_name: &str) -> String {
        format!("{}_{}", self.token, original_name)
    }
}

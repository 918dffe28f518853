//! Shared constants

/// Suffix of every file written into the converted directory.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Content type used when serving converted files.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Number of characters kept from a generated UUID for conversion tokens.
pub const CONVERSION_TOKEN_LEN: usize = 8;

/// Prefix of staging files written next to their final name before they are
/// linked into place. Listings never return names with this prefix.
///
/// Contains `\`, which name sanitization treats as a separator, so no client
/// supplied name can collide with a staging file.
pub const STAGING_FILE_PREFIX: &str = ".staging\\";

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_CONVERTED_DIR: &str = "converted";

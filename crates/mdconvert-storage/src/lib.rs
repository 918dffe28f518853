//! mdconvert Storage Library
//!
//! This crate owns the two flat directories the service manages and the rules for
//! naming files inside them.
//!
//! # Directory layout
//!
//! - **Uploads**: files submitted by clients. Writes never replace an existing name.
//! - **Converted**: Markdown output. Writes replace silently; only `.md` names are listed.
//!
//! Both directories are the only source of truth. Nothing is cached, so every lookup
//! and listing reflects the directory at the time it runs. Every name handed to a
//! store must already be a single path segment (see [`naming::sanitize_filename`]).

pub mod converted;
pub(crate) mod directory;
pub mod error;
pub mod naming;
pub mod uploads;

// Re-export commonly used types
pub use converted::ConvertedStore;
pub use directory::{DirectoryRole, StoredFile};
pub use error::{StorageError, StorageResult};
pub use naming::{sanitize_filename, ConversionIdentity};
pub use uploads::{TemporaryUpload, UploadStore};

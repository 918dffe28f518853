//! Converted directory store

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::Stream;
use tokio_util::io::ReaderStream;

use crate::directory::{DirectoryRole, LocalDirectory, StoredFile, WriteMode};
use crate::error::{StorageError, StorageResult};

/// Store for Markdown output.
///
/// Writes replace any existing file of the same name. Listings only return names
/// ending in `.md`.
#[derive(Debug, Clone)]
pub struct ConvertedStore {
    dir: LocalDirectory,
}

impl ConvertedStore {
    /// Open the store, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = LocalDirectory::new(root, DirectoryRole::Converted).await?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.root()
    }

    pub fn role(&self) -> DirectoryRole {
        self.dir.role()
    }

    pub async fn put(&self, name: &str, text: String) -> StorageResult<StoredFile> {
        self.dir.write(name, Bytes::from(text), WriteMode::Replace).await
    }

    pub async fn get(&self, name: &str) -> StorageResult<StoredFile> {
        self.dir.get(name).await
    }

    pub fn list(&self) -> impl Stream<Item = StorageResult<StoredFile>> + Send + 'static {
        self.dir.list()
    }

    pub async fn remove(&self, name: &str) -> StorageResult<()> {
        self.dir.remove(name).await
    }

    /// Open a file for streaming.
    pub async fn open_stream(
        &self,
        name: &str,
    ) -> StorageResult<(StoredFile, ReaderStream<tokio::fs::File>)> {
        let file = self.dir.get(name).await?;

        let handle = tokio::fs::File::open(&file.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound("File not found".to_string())
            } else {
                StorageError::ReadFailed(format!(
                    "Failed to open file {}: {}",
                    file.path.display(),
                    e
                ))
            }
        })?;

        tracing::debug!(
            path = %file.path.display(),
            size_bytes = file.size_bytes,
            "Streaming converted file"
        );

        Ok((file, ReaderStream::new(handle)))
    }
}

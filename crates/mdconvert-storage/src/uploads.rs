//! Uploads directory store

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::Stream;

use crate::directory::{DirectoryRole, LocalDirectory, StoredFile, WriteMode};
use crate::error::StorageResult;
use crate::naming::ConversionIdentity;

/// Store for client uploaded files.
///
/// A write never replaces an existing name: the second upload of a name fails with
/// [`StorageError::AlreadyExists`](crate::StorageError::AlreadyExists) and the first
/// file is left untouched. There is no remove operation.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: LocalDirectory,
}

impl UploadStore {
    /// Open the store, creating the directory if needed.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = LocalDirectory::new(root, DirectoryRole::Uploads).await?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.root()
    }

    pub fn role(&self) -> DirectoryRole {
        self.dir.role()
    }

    pub fn path_of(&self, name: &str) -> StorageResult<PathBuf> {
        self.dir.resolve(name)
    }

    pub async fn put(&self, name: &str, data: Bytes) -> StorageResult<StoredFile> {
        self.dir.write(name, data, WriteMode::CreateNew).await
    }

    pub async fn get(&self, name: &str) -> StorageResult<StoredFile> {
        self.dir.get(name).await
    }

    pub fn list(&self) -> impl Stream<Item = StorageResult<StoredFile>> + Send + 'static {
        self.dir.list()
    }

    /// Hold `data` under the token-prefixed temporary name of `identity`.
    ///
    /// The returned guard deletes the file when it is removed or dropped.
    pub async fn put_temporary(
        &self,
        identity: &ConversionIdentity,
        original_name: &str,
        data: Bytes,
    ) -> StorageResult<TemporaryUpload> {
        let name = identity.temp_upload_name(original_name);
        let file = self.dir.write(&name, data, WriteMode::CreateNew).await?;

        tracing::debug!(path = %file.path.display(), "Temporary upload saved");

        Ok(TemporaryUpload {
            file,
            removed: false,
        })
    }
}

/// An upload that only lives for the duration of one conversion.
#[derive(Debug)]
pub struct TemporaryUpload {
    file: StoredFile,
    removed: bool,
}

impl TemporaryUpload {
    pub fn name(&self) -> &str {
        &self.file.name
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.file.size_bytes
    }

    /// Delete the file now instead of at drop.
    pub async fn remove(mut self) -> StorageResult<()> {
        self.removed = true;
        match tokio::fs::remove_file(&self.file.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.file.path.display(), "Temporary upload removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for TemporaryUpload {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.file.path) {
            Ok(()) => {
                tracing::debug!(path = %self.file.path.display(), "Temporary upload removed on drop");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %self.file.path.display(),
                    error = %e,
                    "Failed to remove temporary upload"
                );
            }
        }
    }
}

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use futures::{stream, Stream};
use mdconvert_core::constants::{MARKDOWN_EXTENSION, STAGING_FILE_PREFIX};
use tokio::fs;

use crate::error::{StorageError, StorageResult};
use crate::naming::sanitize_filename;

/// Which managed directory a file lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    Uploads,
    Converted,
}

impl DirectoryRole {
    fn lists(&self, name: &str) -> bool {
        if name.starts_with(STAGING_FILE_PREFIX) {
            return false;
        }
        match self {
            DirectoryRole::Uploads => true,
            DirectoryRole::Converted => name.ends_with(MARKDOWN_EXTENSION),
        }
    }

    fn not_found(&self, name: &str) -> StorageError {
        match self {
            DirectoryRole::Uploads => {
                StorageError::NotFound(format!("File '{}' not found in uploads directory", name))
            }
            DirectoryRole::Converted => StorageError::NotFound("File not found".to_string()),
        }
    }
}

impl std::fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryRole::Uploads => write!(f, "uploads"),
            DirectoryRole::Converted => write!(f, "converted"),
        }
    }
}

/// A regular file observed directly inside a managed directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: SystemTime,
    pub role: DirectoryRole,
}

impl StoredFile {
    fn from_metadata(
        name: String,
        path: PathBuf,
        metadata: &std::fs::Metadata,
        role: DirectoryRole,
    ) -> Self {
        Self {
            name,
            path,
            size_bytes: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
            role,
        }
    }

    /// Modification time as seconds since the Unix epoch.
    pub fn modified_epoch_secs(&self) -> f64 {
        self.modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// How a staged file is moved to its final name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Fail with `AlreadyExists` if the name is taken
    CreateNew,
    /// Replace any existing file
    Replace,
}

enum ListState {
    Start(PathBuf),
    Reading(fs::ReadDir),
    Done,
}

/// One flat directory on the local filesystem.
#[derive(Debug, Clone)]
pub(crate) struct LocalDirectory {
    root: PathBuf,
    role: DirectoryRole,
}

impl LocalDirectory {
    pub(crate) async fn new(root: impl Into<PathBuf>, role: DirectoryRole) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create {} directory {}: {}",
                role,
                root.display(),
                e
            ))
        })?;

        // Converters and responses always see absolute paths.
        let root = fs::canonicalize(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve {} directory {}: {}",
                role,
                root.display(),
                e
            ))
        })?;

        Ok(Self { root, role })
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn role(&self) -> DirectoryRole {
        self.role
    }

    /// Map a name to a path inside the directory.
    ///
    /// The name must already be a single sanitized segment.
    pub(crate) fn resolve(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty() || sanitize_filename(name) != name {
            return Err(StorageError::InvalidName(format!(
                "'{}' is not a plain file name",
                name
            )));
        }
        Ok(self.root.join(name))
    }

    pub(crate) async fn get(&self, name: &str) -> StorageResult<StoredFile> {
        let path = self.resolve(name)?;

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(StoredFile::from_metadata(
                name.to_string(),
                path,
                &metadata,
                self.role,
            )),
            Ok(_) => Err(self.role.not_found(name)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(self.role.not_found(name)),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Lazily list the regular files directly inside the directory.
    ///
    /// Every call starts a fresh scan; entries that vanish mid-scan are skipped.
    pub(crate) fn list(&self) -> impl Stream<Item = StorageResult<StoredFile>> + Send + 'static {
        let role = self.role;

        stream::unfold(ListState::Start(self.root.clone()), move |state| async move {
            let mut entries = match state {
                ListState::Start(root) => match fs::read_dir(&root).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        let err = StorageError::ReadFailed(format!(
                            "Failed to read {} directory {}: {}",
                            role,
                            root.display(),
                            e
                        ));
                        return Some((Err(err), ListState::Done));
                    }
                },
                ListState::Reading(entries) => entries,
                ListState::Done => return None,
            };

            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => return None,
                    Err(e) => return Some((Err(StorageError::IoError(e)), ListState::Done)),
                };

                let Ok(name) = entry.file_name().into_string() else {
                    tracing::debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                    continue;
                };
                if !role.lists(&name) {
                    continue;
                }

                let path = entry.path();
                match fs::metadata(&path).await {
                    Ok(metadata) if metadata.is_file() => {
                        let file = StoredFile::from_metadata(name, path, &metadata, role);
                        return Some((Ok(file), ListState::Reading(entries)));
                    }
                    Ok(_) => continue,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                    Err(e) => return Some((Err(StorageError::IoError(e)), ListState::Reading(entries))),
                }
            }
        })
    }

    /// Write `data` under `name`.
    ///
    /// The bytes land in a staging file inside the same directory first and are then
    /// moved into place, so a reader never observes a partially written file.
    pub(crate) async fn write(
        &self,
        name: &str,
        data: Bytes,
        mode: WriteMode,
    ) -> StorageResult<StoredFile> {
        let path = self.resolve(name)?;

        if mode == WriteMode::CreateNew && fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }

        let start = std::time::Instant::now();
        let size = data.len();
        let root = self.root.clone();
        let target = path.clone();
        let owned_name = name.to_string();

        tokio::task::spawn_blocking(move || write_staged(&root, &target, &owned_name, &data, mode))
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Write task failed: {}", e)))??;

        tracing::info!(
            path = %path.display(),
            directory = %self.role,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local file write successful"
        );

        self.get(name).await
    }

    pub(crate) async fn remove(&self, name: &str) -> StorageResult<()> {
        let file = self.get(name).await?;
        let start = std::time::Instant::now();

        fs::remove_file(&file.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                self.role.not_found(name)
            } else {
                StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    file.path.display(),
                    e
                ))
            }
        })?;

        tracing::info!(
            path = %file.path.display(),
            directory = %self.role,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local file delete successful"
        );

        Ok(())
    }
}

fn write_staged(
    root: &Path,
    target: &Path,
    name: &str,
    data: &[u8],
    mode: WriteMode,
) -> StorageResult<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_FILE_PREFIX)
        .tempfile_in(root)
        .map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create staging file in {}: {}",
                root.display(),
                e
            ))
        })?;

    staged.write_all(data).map_err(|e| {
        StorageError::WriteFailed(format!("Failed to write {}: {}", target.display(), e))
    })?;
    staged.as_file().sync_all().map_err(|e| {
        StorageError::WriteFailed(format!("Failed to sync {}: {}", target.display(), e))
    })?;

    let persisted = match mode {
        WriteMode::CreateNew => staged.persist_noclobber(target),
        WriteMode::Replace => staged.persist(target),
    };

    match persisted {
        Ok(_) => Ok(()),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(StorageError::AlreadyExists(name.to_string()))
        }
        Err(e) => Err(StorageError::WriteFailed(format!(
            "Failed to move file into place at {}: {}",
            target.display(),
            e.error
        ))),
    }
}

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use futures_util::{Stream, StreamExt};
use tokio::fs as async_fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use super::models::StoredFile;
use super::name::SafeName;

/// CRUD over one flat directory of files.
///
/// The registry root is an explicitly constructed value, not a process
/// global; tests point it at an isolated temporary directory. The
/// filesystem is the only shared state, so concurrent operations race with
/// last-writer-wins semantics and `list` is a best-effort snapshot.
#[derive(Clone)]
pub struct FileRegistry {
    root: PathBuf,
}

impl FileRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn initialize(&self) -> Result<()> {
        if !self.root.exists() {
            async_fs::create_dir_all(&self.root).await?;
        }

        Ok(())
    }

    /// Enumerates the regular files currently in the registry.
    ///
    /// Subdirectories and other non-regular entries are skipped. An entry
    /// that disappears between enumeration and stat (a concurrent delete)
    /// is skipped and enumeration continues; only a failure to read the
    /// directory itself is an error.
    pub async fn list(&self) -> Result<Vec<StoredFile>> {
        let mut entries = async_fs::read_dir(&self.root)
            .await
            .map_err(|e| AppError::RegistryUnavailable(e.to_string()))?;

        let mut files = Vec::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => return Err(AppError::RegistryUnavailable(e.to_string())),
            };

            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!(
                        "Skipping entry {:?} during listing: {}",
                        entry.file_name(),
                        e
                    );
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            files.push(StoredFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
            });
        }

        Ok(files)
    }

    /// Streams an upload to `root/name`, overwriting any existing file of
    /// that name. Returns the name and the number of bytes written.
    ///
    /// A failed write may leave a partial file behind; it is not cleaned up.
    pub async fn store<S, E>(&self, name: &str, data: S) -> Result<StoredFile>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let name = SafeName::parse(name)?;
        let path = self.root.join(name.as_str());

        let mut file = async_fs::File::create(&path)
            .await
            .map_err(|e| AppError::WriteFailed(e.to_string()))?;

        let mut written: u64 = 0;
        futures_util::pin_mut!(data);

        while let Some(chunk) = data.next().await {
            let chunk = chunk.map_err(|e| AppError::WriteFailed(e.to_string()))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::WriteFailed(e.to_string()))?;
            written += chunk.len() as u64;
        }

        file.sync_all()
            .await
            .map_err(|e| AppError::WriteFailed(e.to_string()))?;

        tracing::info!("Stored file {} ({} bytes)", name, written);

        Ok(StoredFile {
            name: name.into_string(),
            size: written,
        })
    }

    /// Reads back the stored bytes for a name.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let name = SafeName::parse(name)?;
        let path = self.root.join(name.as_str());

        let data = async_fs::read(&path).await?;
        Ok(data)
    }

    /// Removes the file for a name. Fails if the file does not exist or
    /// cannot be removed; failure leaves the registry untouched.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let name = SafeName::parse(name)?;
        let path = self.root.join(name.as_str());

        async_fs::remove_file(&path)
            .await
            .map_err(|e| AppError::DeleteFailed(e.to_string()))?;

        tracing::info!("Deleted file {}", name);

        Ok(())
    }
}

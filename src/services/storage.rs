use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension shared by content and metadata artifacts.
const RECORD_EXT: &str = "tmp";

/// Filesystem store mapping an identifier to a content blob and a
/// sibling display-name record.
///
/// Content and metadata live under two independent roots so that
/// attacker-controlled display names never commingle with binary
/// content, and so metadata can be read without touching the blob.
///
/// Per-identifier operations are naturally collision-free (identifiers
/// are unique), but bulk operations touch the whole root. Callers that
/// purge or scan the entire root must hold the exclusive guard; callers
/// working on a single record hold the shared guard.
pub struct FileStore {
    files_root: PathBuf,
    meta_root: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(files_root: PathBuf, meta_root: PathBuf) -> Self {
        Self {
            files_root,
            meta_root,
            lock: RwLock::new(()),
        }
    }

    /// Creates both roots if they do not exist yet.
    pub async fn init(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.files_root).await?;
        tokio::fs::create_dir_all(&self.meta_root).await?;
        Ok(())
    }

    /// Shared guard for single-record operations.
    pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().await
    }

    /// Exclusive guard for operations spanning the whole root.
    pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().await
    }

    pub fn files_root(&self) -> &Path {
        &self.files_root
    }

    pub fn content_path(&self, id: &str) -> PathBuf {
        self.files_root.join(format!("{id}.{RECORD_EXT}"))
    }

    pub fn metadata_path(&self, id: &str) -> PathBuf {
        self.meta_root.join(format!("{id}.{RECORD_EXT}"))
    }

    pub async fn put(&self, id: &str, content: &[u8]) -> io::Result<()> {
        let path = self.content_path(id);
        tracing::info!("Saving file: {}", path.display());
        tokio::fs::write(path, content).await
    }

    pub async fn put_metadata(&self, id: &str, name: &str) -> io::Result<()> {
        let path = self.metadata_path(id);
        tracing::debug!("Saving metadata file: {}", path.display());
        tokio::fs::write(path, name.as_bytes()).await
    }

    pub async fn get(&self, id: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.content_path(id)).await
    }

    /// Reads the display name stored for `id`, if any.
    pub async fn get_metadata(&self, id: &str) -> Option<String> {
        match tokio::fs::read_to_string(self.metadata_path(id)).await {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!("Unable to fetch metadata for {}: {}", id, e);
                None
            }
        }
    }

    /// Removes the content artifact. Metadata is left in place.
    pub async fn delete(&self, id: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.content_path(id)).await
    }

    /// Purges the content root and recreates it empty.
    pub async fn delete_all(&self) -> io::Result<()> {
        tokio::fs::remove_dir_all(&self.files_root).await?;
        tokio::fs::create_dir_all(&self.files_root).await
    }

    /// Identifiers of all stored content artifacts. Ordering is
    /// unspecified and the snapshot is not stable across concurrent
    /// structural changes.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.files_root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(&format!(".{RECORD_EXT}")) {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }
}

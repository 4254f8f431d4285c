//! Filesystem-backed asset store. Stored files are served back by the
//! router under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;

use blog_core::storage::{AssetStore, StorageError};

pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn store(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), media_type, size = bytes.len(), "asset stored");
        Ok(format!("/uploads/{file_name}"))
    }
}

use async_trait::async_trait;
use thiserror::Error;

/// Opaque failure from an asset store. Never retried here; the HTTP layer
/// surfaces it distinctly from a validation rejection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Binary asset store. Implementations persist the bytes and return the
/// URL the asset is retrievable from.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;
}

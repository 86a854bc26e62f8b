use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Destination for uploaded bytes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, replacing whatever was stored there before.
    async fn upload(&self, key: &str, data: Vec<u8>) -> anyhow::Result<()>;

    /// Whether the backend can currently accept writes.
    async fn is_ready(&self) -> bool;
}

/// Files on the local disk, one per key, directly under `base_path`.
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await.with_context(|| {
                format!("Failed to create upload directory {}", base_path.display())
            })?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, data: Vec<u8>) -> anyhow::Result<()> {
        let path = self.base_path.join(key);
        // No locking: concurrent uploads of the same key race and the last write wins.
        fs::write(&path, data)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        fs::metadata(&self.base_path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

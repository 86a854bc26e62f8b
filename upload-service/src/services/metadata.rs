use async_trait::async_trait;

/// External collaborator that records metadata about stored documents.
///
/// Implementations report failure through the returned error; callers treat
/// any error as a storage failure for the whole request.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn record(&self, name: &str) -> anyhow::Result<()>;
}

/// Accepts every document without persisting anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetadataStore;

#[async_trait]
impl MetadataStore for NoopMetadataStore {
    async fn record(&self, name: &str) -> anyhow::Result<()> {
        tracing::debug!(filename = %name, "Metadata store is a no-op; nothing recorded");
        Ok(())
    }
}

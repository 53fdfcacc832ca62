use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Persist an audio artifact and return the path it can be served from
    async fn store(&self, name: &str, audio: &[u8]) -> Result<String>;

    /// Load a previously stored artifact by the name it was stored under
    async fn load(&self, name: &str) -> Result<Vec<u8>>;
}

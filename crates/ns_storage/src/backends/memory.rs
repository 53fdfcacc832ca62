use async_trait::async_trait;
use ns_core::{AudioStorage, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const SCHEME: &str = "memory://";

#[derive(Debug, Clone, Default)]
pub struct MemoryAudioStorage {
    artifacts: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryAudioStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AudioStorage for MemoryAudioStorage {
    async fn store(&self, name: &str, audio: &[u8]) -> Result<String> {
        self.artifacts.write().await.insert(name.to_string(), audio.to_vec());
        Ok(format!("{}{}", SCHEME, name))
    }

    async fn load(&self, name: &str) -> Result<Vec<u8>> {
        self.artifacts
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryAudioStorage::new();
        let path = storage.store("output_abc.mp3", &[1, 2, 3]).await.unwrap();
        assert_eq!(path, "memory://output_abc.mp3");
        assert_eq!(storage.load("output_abc.mp3").await.unwrap(), vec![1, 2, 3]);
        assert!(matches!(storage.load("missing.mp3").await, Err(Error::NotFound(_))));
    }
}

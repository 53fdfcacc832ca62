use async_trait::async_trait;
use ns_core::{AudioStorage, Error, Result};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Writes artifacts under a fixed directory, created on first use.
#[derive(Debug, Clone)]
pub struct FileAudioStorage {
    dir: PathBuf,
}

impl FileAudioStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves a bare artifact name inside the storage directory.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.starts_with('.') {
            return Err(Error::Storage(format!("Invalid artifact name: {:?}", name)));
        }
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl AudioStorage for FileAudioStorage {
    async fn store(&self, name: &str, audio: &[u8]) -> Result<String> {
        let path = self.resolve(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, audio).await?;
        debug!("💾 Wrote {} bytes to {}", audio.len(), path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    /// Only names inside the storage directory resolve; anything else is not found.
    async fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self
            .resolve(name)
            .map_err(|_| Error::NotFound(name.to_string()))?;
        match tokio::fs::read(&path).await {
            Ok(audio) => Ok(audio),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileAudioStorage::new(dir.path().join("data"));

        let path = storage.store("acme_0123456789ab.mp3", b"ID3").await.unwrap();
        assert!(path.ends_with("acme_0123456789ab.mp3"));
        assert_eq!(storage.load("acme_0123456789ab.mp3").await.unwrap(), b"ID3");
        assert!(matches!(storage.load("other.mp3").await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_storage_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileAudioStorage::new(dir.path().join("data"));
        std::fs::write(dir.path().join("secret.txt"), b"x").unwrap();

        assert!(storage.store("../escape.mp3", b"x").await.is_err());
        assert!(storage.store("", b"x").await.is_err());
        assert!(matches!(storage.load("../secret.txt").await, Err(Error::NotFound(_))));
        let absolute = dir.path().join("secret.txt");
        assert!(matches!(
            storage.load(&absolute.to_string_lossy()).await,
            Err(Error::NotFound(_))
        ));
    }
}

use std::path::PathBuf;

use async_trait::async_trait;

use crate::app::ports::TransportPort;
use crate::error::TransportError;

/// Filesystem implementation of `TransportPort`.
///
/// Reads payloads from a local drop directory, standing in for the secure
/// file retrieval hop that lands upstream claim files. The identifier is a
/// file name relative to the drop directory.
pub struct FsTransport {
    base_dir: PathBuf,
}

impl FsTransport {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl TransportPort for FsTransport {
    async fn fetch(&self, identifier: &str) -> Result<Vec<u8>, TransportError> {
        let path = self.base_dir.join(identifier);
        if !path.exists() {
            return Err(TransportError::NotFound(path.display().to_string()));
        }
        std::fs::read(&path).map_err(|source| TransportError::Io {
            identifier: identifier.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetches_existing_payload() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("claims.json"), b"[]").unwrap();

        let transport = FsTransport::new(dir.path());
        let bytes = transport.fetch("claims.json").await.unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn missing_payload_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let transport = FsTransport::new(dir.path());
        let err = transport.fetch("absent.json").await.unwrap_err();
        assert!(matches!(err, TransportError::NotFound(_)));
    }
}

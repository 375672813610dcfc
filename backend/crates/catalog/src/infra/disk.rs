//! Local filesystem image store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::image_store::ImageStore;
use crate::error::{CatalogError, CatalogResult};

/// Stores images as flat files in one directory
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if needed
    pub async fn ensure_dir(&self) -> CatalogResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Only bare file names resolve; anything with a path component is refused
    fn path_for(&self, filename: &str) -> CatalogResult<PathBuf> {
        match Path::new(filename).file_name() {
            Some(name) if name == filename => Ok(self.root.join(name)),
            _ => Err(CatalogError::Internal(format!(
                "Invalid image filename: {filename}"
            ))),
        }
    }
}

impl ImageStore for DiskImageStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> CatalogResult<()> {
        let path = self.path_for(filename)?;
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Image stored");
        Ok(())
    }

    async fn remove(&self, filename: &str) -> CatalogResult<()> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> DiskImageStore {
        DiskImageStore::new(std::env::temp_dir().join(format!("catalog-store-{}", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        store.save("images-1-123456789.png", b"png").await.unwrap();
        let path = store.root().join("images-1-123456789.png");
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png");

        store.remove("images-1-123456789.png").await.unwrap();
        assert!(!path.exists());

        // Already gone
        store.remove("images-1-123456789.png").await.unwrap();

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_components() {
        let store = scratch_store();
        assert!(store.save("../escape.png", b"x").await.is_err());
        assert!(store.remove("nested/file.png").await.is_err());
    }
}

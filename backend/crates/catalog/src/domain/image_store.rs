//! Image storage port

use crate::error::CatalogResult;

/// Content directory for uploaded images, addressed by generated filename
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    async fn save(&self, filename: &str, bytes: &[u8]) -> CatalogResult<()>;

    /// Removing a file that is already gone is not an error
    async fn remove(&self, filename: &str) -> CatalogResult<()>;
}

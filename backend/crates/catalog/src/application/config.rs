//! Application Configuration
//!
//! Upload limits and storage location for the catalog.

use std::path::PathBuf;

pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 10;
/// Public URL prefix the content directory is served under
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Content directory for uploaded images
    pub upload_dir: PathBuf,
    /// Per-file byte limit
    pub max_file_size: usize,
    /// Files accepted in one request
    pub max_files: usize,
    /// MIME allow-list
    pub allowed_types: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_files: DEFAULT_MAX_FILES,
            allowed_types: ["image/jpeg", "image/jpg", "image/png"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl CatalogConfig {
    /// Create config for development, storing uploads under the system temp dir
    pub fn development() -> Self {
        Self {
            upload_dir: std::env::temp_dir().join("catalog-uploads"),
            ..Default::default()
        }
    }

    pub fn is_allowed_type(&self, content_type: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type.trim()))
    }

    /// Request body limit: a full batch plus 1 MiB for the text fields
    pub fn body_limit(&self) -> usize {
        self.max_files
            .saturating_mul(self.max_file_size)
            .saturating_add(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let config = CatalogConfig::default();
        assert!(config.is_allowed_type("image/jpeg"));
        assert!(config.is_allowed_type("IMAGE/PNG"));
        assert!(!config.is_allowed_type("application/pdf"));
        assert!(!config.is_allowed_type("image/gif"));
    }

    #[test]
    fn test_body_limit() {
        let config = CatalogConfig::default();
        assert_eq!(config.body_limit(), 10 * 10 * 1024 * 1024 + 1024 * 1024);
    }
}

//! Image upload handling
//!
//! A batch is validated as a whole before anything is written, so a
//! rejected request leaves no files behind.

use chrono::Utc;
use rand::Rng;
use std::path::Path;

use crate::application::config::{CatalogConfig, UPLOADS_URL_PREFIX};
use crate::domain::image_store::ImageStore;
use crate::domain::value_object::image_record::ImageRecord;
use crate::error::{CatalogError, CatalogResult};

/// Multipart field carrying image files
pub const IMAGE_FIELD: &str = "images";

const MAX_EXTENSION_LENGTH: usize = 10;

/// A file received in the request body, not yet stored
#[derive(Clone)]
pub struct IncomingImage {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for IncomingImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingImage")
            .field("original_name", &self.original_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Check count, MIME type and size of every file
pub fn validate_batch(config: &CatalogConfig, images: &[IncomingImage]) -> CatalogResult<()> {
    if images.len() > config.max_files {
        return Err(CatalogError::TooManyFiles {
            max: config.max_files,
        });
    }

    if let Some(image) = images
        .iter()
        .find(|image| !config.is_allowed_type(&image.content_type))
    {
        return Err(CatalogError::UnsupportedFileType(image.content_type.clone()));
    }

    if let Some(image) = images
        .iter()
        .find(|image| image.bytes.len() > config.max_file_size)
    {
        return Err(CatalogError::FileTooLarge {
            name: image.original_name.clone(),
            max: config.max_file_size,
        });
    }

    Ok(())
}

/// `images-<unix_ms>-<9 random digits><.ext>`
pub fn generate_filename(original_name: &str, now_ms: i64) -> String {
    let suffix: u32 = rand::rng().random_range(100_000_000..1_000_000_000);
    format!(
        "images-{now_ms}-{suffix}{}",
        extension_of(original_name).unwrap_or_default()
    )
}

/// Original extension with its dot, if it is plain ASCII alphanumerics
fn extension_of(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LENGTH
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{ext}"))
}

/// Write a validated batch. If any write fails, files already written
/// are removed again before the error is returned.
pub async fn store_images<S>(store: &S, images: Vec<IncomingImage>) -> CatalogResult<Vec<ImageRecord>>
where
    S: ImageStore,
{
    let now_ms = Utc::now().timestamp_millis();
    let mut records = Vec::with_capacity(images.len());

    for image in images {
        let filename = generate_filename(&image.original_name, now_ms);

        if let Err(e) = store.save(&filename, &image.bytes).await {
            discard_images(store, &records).await;
            return Err(e);
        }

        records.push(ImageRecord {
            path: format!("{UPLOADS_URL_PREFIX}/{filename}"),
            filename,
            original_name: image.original_name,
            size: image.bytes.len() as u64,
        });
    }

    Ok(records)
}

/// Best-effort removal; failures are logged and skipped
pub async fn discard_images<S>(store: &S, records: &[ImageRecord])
where
    S: ImageStore,
{
    for record in records {
        if let Err(e) = store.remove(&record.filename).await {
            tracing::warn!(
                filename = %record.filename,
                error = %e,
                "Failed to remove image file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, content_type: &str, size: usize) -> IncomingImage {
        IncomingImage {
            original_name: name.into(),
            content_type: content_type.into(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_filename_shape() {
        let name = generate_filename("front.JPG", 1_700_000_000_000);
        let rest = name.strip_prefix("images-1700000000000-").unwrap();
        let (digits, ext) = rest.split_at(9);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(ext, ".JPG");
    }

    #[test]
    fn test_filename_drops_odd_extension() {
        let name = generate_filename("evil.ph p", 1);
        assert!(!name.contains(' '));
        let name = generate_filename("noext", 1);
        assert_eq!(name.len(), "images-1-".len() + 9);
    }

    #[test]
    fn test_batch_limits() {
        let config = CatalogConfig::default();
        assert!(validate_batch(&config, &[]).is_ok());

        let eleven: Vec<_> = (0..11).map(|i| image(&format!("{i}.jpg"), "image/jpeg", 1)).collect();
        assert!(matches!(
            validate_batch(&config, &eleven),
            Err(CatalogError::TooManyFiles { max: 10 })
        ));

        let pdf = [image("a.png", "image/png", 1), image("doc.pdf", "application/pdf", 1)];
        assert!(matches!(
            validate_batch(&config, &pdf),
            Err(CatalogError::UnsupportedFileType(t)) if t == "application/pdf"
        ));
    }

    #[test]
    fn test_file_size_limit() {
        let config = CatalogConfig {
            max_file_size: 4,
            ..Default::default()
        };
        assert!(validate_batch(&config, &[image("a.png", "image/png", 4)]).is_ok());
        assert!(matches!(
            validate_batch(&config, &[image("b.png", "image/png", 5)]),
            Err(CatalogError::FileTooLarge { .. })
        ));
    }
}

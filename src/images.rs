//! Images
//!
//! Picks the single image a cart line displays. Selection happens in two steps:
//! first the image entry (primary, then first, then the product's top-level
//! fields), then the field within that entry (URL before storage path).

use serde::{Deserialize, Serialize};

use crate::products::{ImageRef, ProductSnapshot};

/// The image chosen for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalImage {
    /// Displayable URL
    pub url: String,

    /// Storage path the URL was built from, if any
    pub path: Option<String>,
}

impl CanonicalImage {
    fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            path: None,
        }
    }

    fn from_path(path: &str, base_url: &str) -> Self {
        Self {
            url: storage_url(base_url, path),
            path: Some(path.to_string()),
        }
    }
}

/// Join a storage-relative path to the storage base URL.
pub fn storage_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

impl ImageRef {
    /// The displayable form of this entry: its URL, else its storage path.
    pub fn to_canonical(&self, base_url: &str) -> Option<CanonicalImage> {
        present(self.image_url.as_deref())
            .map(CanonicalImage::from_url)
            .or_else(|| {
                present(self.image_path.as_deref())
                    .map(|path| CanonicalImage::from_path(path, base_url))
            })
    }
}

/// Select the entry to display: the first primary entry, else the first entry.
pub fn select_image(images: &[ImageRef]) -> Option<&ImageRef> {
    images
        .iter()
        .find(|image| image.is_primary)
        .or_else(|| images.first())
}

/// Resolve an image list plus top-level fallbacks to one displayable image.
///
/// Returns `None` when nothing usable exists, in which case callers render a
/// placeholder. An entry that is selected but carries neither a URL nor a path
/// falls through to the top-level fields.
pub fn resolve_images(
    images: &[ImageRef],
    fallback_url: Option<&str>,
    fallback_path: Option<&str>,
    base_url: &str,
) -> Option<CanonicalImage> {
    select_image(images)
        .and_then(|image| image.to_canonical(base_url))
        .or_else(|| present(fallback_url).map(CanonicalImage::from_url))
        .or_else(|| present(fallback_path).map(|path| CanonicalImage::from_path(path, base_url)))
}

/// Resolve the display image of a product snapshot.
pub fn resolve_image(product: &ProductSnapshot, base_url: &str) -> Option<CanonicalImage> {
    resolve_images(
        &product.images,
        product.image_url.as_deref(),
        product.image_path.as_deref(),
        base_url,
    )
}

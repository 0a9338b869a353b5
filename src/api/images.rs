//! Product and category image locations.

/// Brand purple background with white text
const PLACEHOLDER_BASE: &str = "https://placehold.co/400x300/7B24F8/FFFFFF";

/// Products share one fallback label; categories are labelled by id
const PRODUCT_PLACEHOLDER_LABEL: &str = "Image not available";

/// Where to load an image from, and what to show if that load fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSource {
    pub url: String,
    pub placeholder: String,
}

impl ImageSource {
    pub fn product(catalog_url: &str, id: i64) -> Self {
        Self {
            url: format!("{}/productos/{}/imagen", catalog_url, id),
            placeholder: placeholder_url(PRODUCT_PLACEHOLDER_LABEL),
        }
    }

    pub fn category(catalog_url: &str, id: i64) -> Self {
        Self {
            url: format!("{}/categorias/{}/imagen", catalog_url, id),
            placeholder: placeholder_url(&format!("Category {}", id)),
        }
    }

    /// URL the renderer should use given whether the primary load failed.
    pub fn resolve(&self, load_failed: bool) -> &str {
        if load_failed {
            &self.placeholder
        } else {
            &self.url
        }
    }
}

pub fn placeholder_url(label: &str) -> String {
    format!("{}?text={}", PLACEHOLDER_BASE, urlencoding::encode(label))
}

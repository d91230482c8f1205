//! Card preview URLs on the card-art asset host.

use crate::config::IMAGE_BASE_URL;
use crate::models::CardRecord;

/// Builds `{base}/{setCode}/{setCode}_EN_{cardNumber}.png` references.
///
/// Only constructs the URL; fetching the image is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
}

impl Default for ImageResolver {
    fn default() -> Self {
        Self::new(IMAGE_BASE_URL)
    }
}

impl ImageResolver {
    /// Resolver against a custom asset host. A trailing `/` is dropped.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for `record`, or `""` when nothing is selected.
    pub fn resolve(&self, record: Option<&CardRecord>) -> String {
        match record {
            Some(r) => format!(
                "{}/{}/{}_EN_{}.png",
                self.base_url, r.set_code, r.set_code, r.card_number
            ),
            None => String::new(),
        }
    }
}

/// [`ImageResolver::resolve`] against the default asset host.
pub fn resolve_image(record: Option<&CardRecord>) -> String {
    ImageResolver::default().resolve(record)
}

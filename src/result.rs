//! Image record and aggregated response types.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single normalized image, independent of the provider that produced it.
///
/// `(source, image_id)` identifies a record. The same photo reached through
/// two providers yields two records; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Display title.
    pub title: String,
    /// Longer description or caption.
    pub description: Option<String>,
    /// Small preview URL.
    pub thumbnail_url: String,
    /// Regular display URL.
    pub regular_url: String,
    /// Original/raw resolution URL.
    pub raw_url: Option<String>,
    /// Photographer or author name.
    pub photographer: Option<String>,
    /// Photographer profile URL.
    pub photographer_url: Option<String>,
    /// Identifier of the provider that produced the record.
    pub source: String,
    /// Landing page of the image on the provider site.
    pub source_url: String,
    /// Download URL.
    pub download_url: String,
    /// License descriptor (e.g. "free", "paid", "CC BY-SA").
    pub license: String,
    /// Provider-scoped image identifier.
    pub image_id: String,
}

impl ImageRecord {
    /// Creates a record with the required identity fields.
    pub fn new(
        source: impl Into<String>,
        image_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            image_id: image_id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Forces every URL field to be either absolute or empty (`None` for optional ones).
    pub fn sanitized(mut self) -> Self {
        self.thumbnail_url = absolute_url_or_empty(self.thumbnail_url);
        self.regular_url = absolute_url_or_empty(self.regular_url);
        self.source_url = absolute_url_or_empty(self.source_url);
        self.download_url = absolute_url_or_empty(self.download_url);
        self.raw_url = self.raw_url.map(absolute_url_or_empty).filter(|u| !u.is_empty());
        self.photographer_url = self
            .photographer_url
            .map(absolute_url_or_empty)
            .filter(|u| !u.is_empty());
        self
    }
}

/// Returns the URL unchanged if it parses as an absolute http(s) URL, otherwise "".
pub(crate) fn absolute_url_or_empty(url: String) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => trimmed.to_string(),
        _ => String::new(),
    }
}

/// Aggregated response for one search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as received.
    pub query: String,
    /// Number of images fetched across all providers.
    pub total_results: usize,
    /// Images in canonical provider order, then provider order.
    pub images: Vec<ImageRecord>,
    /// Wall-clock time spent serving the request.
    pub search_time_ms: f64,
}

impl SearchResponse {
    /// Creates a response, deriving `total_results` from the image list.
    pub fn new(query: impl Into<String>, images: Vec<ImageRecord>, search_time_ms: f64) -> Self {
        Self {
            query: query.into(),
            total_results: images.len(),
            images,
            search_time_ms,
        }
    }

    /// Returns the images.
    pub fn items(&self) -> &[ImageRecord] {
        &self.images
    }
}

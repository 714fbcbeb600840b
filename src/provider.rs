//! Image provider trait.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ImageQuery, ImageRecord, Result};

/// Commercial tier a provider is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Paid,
}

/// Trait for image search providers.
///
/// Implementors supply [`fetch`](Provider::fetch), which reports failures
/// through [`Result`]. Callers use [`search`](Provider::search), which never
/// fails: a missing credential or any fetch error yields an empty list.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider identifier (e.g. "pexels").
    fn id(&self) -> &str;

    /// Returns the human-readable provider name.
    fn name(&self) -> &str;

    /// Returns the tier the provider is listed under.
    fn tier(&self) -> Tier;

    /// Returns whether all required credentials are configured.
    fn is_available(&self) -> bool;

    /// Returns the upper bound on one search call.
    fn timeout(&self) -> Duration;

    /// Queries the upstream API and maps its response.
    async fn fetch(&self, query: &ImageQuery) -> Result<Vec<ImageRecord>>;

    /// Searches the provider, absorbing every failure into an empty result.
    async fn search(&self, query: &ImageQuery) -> Vec<ImageRecord> {
        if !self.is_available() {
            debug!("Provider {} skipped: missing credentials", self.id());
            return Vec::new();
        }

        match self.fetch(query).await {
            Ok(images) => {
                debug!("Provider {} returned {} images", self.id(), images.len());
                images
            }
            Err(e) => {
                warn!("Provider {} failed: {}", self.id(), e);
                Vec::new()
            }
        }
    }
}

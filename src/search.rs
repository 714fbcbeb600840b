//! Search orchestration.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::providers::DEFAULT_SOURCES;
use crate::{ImageQuery, ImageRecord, Registry, Result, SearchError, SearchResponse};

/// Fans a query out to the requested providers and joins their results.
pub struct Search {
    registry: Arc<Registry>,
}

impl Search {
    /// Creates a search over the given registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Performs a search across the requested providers.
    ///
    /// Each provider call runs as its own task, bounded by that provider's
    /// timeout. A call that times out or panics contributes no images.
    /// Dropping the returned future does not cancel calls already started.
    pub async fn search(&self, query: ImageQuery) -> Result<SearchResponse> {
        let start = Instant::now();

        query.validate()?;

        let requested: Vec<String> = if query.sources.is_empty() {
            DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
        } else {
            query.sources.clone()
        };

        let mut providers = self.registry.resolve(&requested);
        if providers.is_empty() {
            return Err(SearchError::NoSources);
        }
        providers.sort_by_key(|p| self.registry.position(p.id()).unwrap_or(usize::MAX));

        debug!("Searching {} providers for '{}'", providers.len(), query.query);

        let query = Arc::new(query);

        let calls: Vec<_> = providers
            .into_iter()
            .map(|provider| {
                let query = Arc::clone(&query);
                let id = provider.id().to_string();
                let ceiling = provider.timeout();

                let handle =
                    tokio::spawn(async move { timeout(ceiling, provider.search(&query)).await });

                async move {
                    match handle.await {
                        Ok(Ok(images)) => images,
                        Ok(Err(_)) => {
                            warn!("Provider {} timed out after {:?}", id, ceiling);
                            Vec::new()
                        }
                        Err(e) => {
                            warn!("Provider {} task failed: {}", id, e);
                            Vec::new()
                        }
                    }
                }
            })
            .collect();

        let images: Vec<ImageRecord> = join_all(calls).await.into_iter().flatten().collect();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(SearchResponse::new(query.query.clone(), images, elapsed_ms))
    }
}

//! Provider registry.
//!
//! The registry is the only place that knows which source identifiers are
//! valid. Its order is the canonical order used when assembling results.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::providers::{Adapter, CATALOG};
use crate::{Config, Provider, Result, Tier};

/// One entry in the source listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub available: bool,
}

/// Sources partitioned by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceListing {
    pub free: Vec<SourceInfo>,
    pub paid: Vec<SourceInfo>,
}

/// Ordered table of providers keyed by identifier.
pub struct Registry {
    providers: Vec<Arc<dyn Provider>>,
}

impl Registry {
    /// Builds one adapter per catalog entry, in catalog order.
    pub fn new(config: &Config) -> Result<Self> {
        let providers = CATALOG
            .iter()
            .map(|spec| Ok(Arc::new(Adapter::new(spec, config)?) as Arc<dyn Provider>))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { providers })
    }

    /// Builds a registry from explicit providers; their order becomes canonical.
    pub fn with_providers(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns the provider with the given identifier.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Provider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Returns the canonical position of a provider.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.providers.iter().position(|p| p.id() == id)
    }

    /// Lists every provider with its availability, grouped by tier.
    pub fn list_sources(&self) -> SourceListing {
        let mut listing = SourceListing::default();
        for provider in &self.providers {
            let info = SourceInfo {
                id: provider.id().to_string(),
                name: provider.name().to_string(),
                available: provider.is_available(),
            };
            match provider.tier() {
                Tier::Free => listing.free.push(info),
                Tier::Paid => listing.paid.push(info),
            }
        }
        listing
    }

    /// Resolves identifiers to providers in caller order.
    ///
    /// Unknown identifiers and repeats are dropped without error.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Arc<dyn Provider>> {
        let mut resolved: Vec<Arc<dyn Provider>> = Vec::new();
        for id in ids {
            let Some(provider) = self.get(id.as_ref()) else {
                continue;
            };
            if !resolved.iter().any(|p| p.id() == provider.id()) {
                resolved.push(Arc::clone(provider));
            }
        }
        resolved
    }
}

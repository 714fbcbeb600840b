//! Bearer-token cache for client-credentials providers.

use std::future::Future;

use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::Result;

/// Tokens are treated as expired this long before their real expiry.
const EXPIRY_SKEW: Duration = Duration::from_secs(30);

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.expires_at
            .map(|at| Instant::now() + EXPIRY_SKEW < at)
            .unwrap_or(true)
    }
}

/// In-memory token cache shared by concurrent calls on one adapter.
///
/// Two callers racing on an empty cache may both fetch; the last write
/// wins. Readers always see a whole token.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, fetching a new one when absent or expired.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken>>,
    {
        {
            let guard = self.inner.read().await;
            if let Some(token) = guard.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.value.clone());
            }
        }

        let token = fetch().await?;
        let cached = CachedToken {
            value: token.access_token,
            expires_at: token
                .expires_in
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
        };
        let value = cached.value.clone();
        *self.inner.write().await = Some(cached);
        Ok(value)
    }

    /// Drops the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}

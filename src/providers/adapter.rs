//! Generic HTTP adapter driven by a [`ProviderSpec`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::mapping;
use super::spec::{Auth, Paging, ProviderSpec};
use super::token::{AccessToken, TokenCache};
use crate::{Config, ImageQuery, ImageRecord, Provider, Result, SearchError, Tier};

const USER_AGENT: &str = concat!("lumina-search/", env!("CARGO_PKG_VERSION"));

/// One upstream image API, configured entirely by its descriptor.
pub struct Adapter {
    spec: &'static ProviderSpec,
    client: Client,
    base_url: String,
    secrets: HashMap<&'static str, String>,
    token: TokenCache,
}

impl Adapter {
    /// Creates an adapter, copying the credentials it needs out of `config`.
    ///
    /// Fails only when the HTTP client cannot be built.
    pub fn new(spec: &'static ProviderSpec, config: &Config) -> Result<Self> {
        let secrets = spec
            .required_secrets()
            .into_iter()
            .filter_map(|key| config.secret(key).map(|value| (key, value.to_string())))
            .collect();

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(spec.timeout_secs))
            .build()?;

        Ok(Self {
            spec,
            client,
            base_url: spec.base_url.to_string(),
            secrets,
            token: TokenCache::new(),
        })
    }

    /// Points the adapter at a different host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the descriptor.
    pub fn spec(&self) -> &'static ProviderSpec {
        self.spec
    }

    fn secret(&self, key: &str) -> Result<&str> {
        self.secrets
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SearchError::MissingCredentials(self.spec.id.to_string()))
    }

    /// Builds the provider-native query parameters.
    fn params(&self, query: &ImageQuery) -> Result<Vec<(&'static str, String)>> {
        let spec = self.spec;
        let per_page = spec.clamp_per_page(query.per_page);
        let page = query.page.max(1);

        let mut params = vec![(spec.query_param, query.query.trim().to_string())];

        match spec.paging {
            Paging::Page { page: p, size } => {
                params.push((p, page.to_string()));
                params.push((size, per_page.to_string()));
            }
            Paging::Offset { start, count } => {
                let offset = (page - 1).saturating_mul(per_page).saturating_add(1);
                params.push((start, offset.to_string()));
                params.push((count, per_page.to_string()));
            }
        }

        params.extend(spec.params.iter().map(|(k, v)| (*k, v.to_string())));

        if let Some(order) = spec.order {
            if let Some(value) = order.value(query.order_by) {
                params.push((order.name, value.to_string()));
            }
        }

        if let Auth::Query(pairs) = spec.auth {
            for (param, key) in pairs {
                params.push((*param, self.secret(key)?.to_string()));
            }
        }

        Ok(params)
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.spec.auth {
            Auth::Header {
                name,
                prefix,
                secret,
            } => request.header(name, format!("{}{}", prefix, self.secret(secret)?)),
            Auth::ClientCredentials {
                token_path,
                client_id,
                client_secret,
            } => {
                let id = self.secret(client_id)?;
                let secret = self.secret(client_secret)?;
                let token = self
                    .token
                    .get_or_fetch(|| self.request_token(token_path, id, secret))
                    .await?;
                request.bearer_auth(token)
            }
            Auth::None | Auth::Query(_) => request,
        })
    }

    async fn request_token(
        &self,
        token_path: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken> {
        debug!("Requesting access token for {}", self.spec.id);

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];
        let response = self
            .client
            .post(format!("{}{}", self.base_url, token_path))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Auth(
                self.spec.id.to_string(),
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| SearchError::Auth(self.spec.id.to_string(), e.to_string()))
    }
}

#[async_trait]
impl Provider for Adapter {
    fn id(&self) -> &str {
        self.spec.id
    }

    fn name(&self) -> &str {
        self.spec.name
    }

    fn tier(&self) -> Tier {
        self.spec.tier
    }

    fn is_available(&self) -> bool {
        self.spec
            .required_secrets()
            .iter()
            .all(|key| self.secrets.contains_key(key))
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.spec.timeout_secs)
    }

    async fn fetch(&self, query: &ImageQuery) -> Result<Vec<ImageRecord>> {
        let spec = self.spec;
        let url = format!("{}{}", self.base_url, spec.path);
        let params = self.params(query)?;

        let mut request = self.client.get(&url).query(&params);
        for (name, value) in spec.headers {
            request = request.header(*name, *value);
        }
        let request = self.authorize(request).await?;

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED
                && matches!(spec.auth, Auth::ClientCredentials { .. })
            {
                self.token.invalidate().await;
            }
            return Err(SearchError::Status {
                provider: spec.id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let body: Value = serde_json::from_str(&body)?;
        let mut images = mapping::map_results(&body, spec)?;

        // Providers with a page-size floor may return more than was asked for.
        images.truncate(query.per_page.max(1) as usize);
        Ok(images)
    }
}

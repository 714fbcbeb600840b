//! Process-wide configuration.
//!
//! Built once at startup and shared read-only afterwards. Credentials are
//! stored under the environment key each provider declares in its
//! [`ProviderSpec`](crate::providers::ProviderSpec), so naming stays local
//! to the provider that needs it.

use std::collections::HashMap;
use std::env;

use tracing::warn;

use crate::providers;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8001;

/// Server settings and provider credentials.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub host: String,
    /// Port the HTTP API listens on.
    pub port: u16,
    /// Allowed CORS origins; `*` allows any.
    pub cors_origins: Vec<String>,
    secrets: HashMap<String, String>,
}

impl Config {
    /// Creates a configuration with default server settings and no credentials.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            secrets: HashMap::new(),
        }
    }

    /// Loads configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid PORT value '{}'", port),
            }
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !origins.is_empty() {
                config.cors_origins = origins;
            }
        }

        for key in providers::credential_keys() {
            if let Some(value) = lookup(key) {
                config = config.with_secret(key, value);
            }
        }

        config
    }

    /// Sets a credential value. Blank values are ignored.
    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.secrets.insert(key.into(), value.trim().to_string());
        }
        self
    }

    /// Sets the bind address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the listening port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Returns a credential, or `None` when it is absent or empty.
    pub fn secret(&self, key: &str) -> Option<&str> {
        self.secrets.get(key).map(String::as_str)
    }

    /// Returns the socket address string for the HTTP API.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};

/// Public CORS relay used when no override is configured.
pub const DEFAULT_PROXY_URL: &str = "https://corsproxy.io";

/// Proxy configuration shared by everything that builds fetch candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Base URL the locator is appended to for the proxied candidate.
    pub proxy_url: String,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_owned(),
        }
    }
}

impl ProxySettings {
    pub fn new(proxy_url: impl Into<String>) -> Self {
        Self {
            proxy_url: proxy_url.into(),
        }
    }

    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = proxy_url.into();
        self
    }
}

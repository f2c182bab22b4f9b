use std::fmt;

use super::settings::ProxySettings;
use crate::core::proxied_url;

/// Which network path a candidate takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The locator exactly as given.
    Direct,

    /// The locator appended to the configured proxy base.
    Proxied,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Direct => "direct",
            Origin::Proxied => "proxied",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One concrete URL to attempt for a locator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchCandidate {
    pub url:    String,
    pub origin: Origin,
}

impl FetchCandidate {
    pub fn direct(locator: impl Into<String>) -> Self {
        Self {
            url:    locator.into(),
            origin: Origin::Direct,
        }
    }

    pub fn proxied(locator: &str, settings: &ProxySettings) -> Self {
        Self {
            url:    proxied_url(&settings.proxy_url, locator),
            origin: Origin::Proxied,
        }
    }

    /// The ranked candidate list: direct first, then one proxy rewrite.
    pub fn list(locator: &str, settings: &ProxySettings) -> Vec<FetchCandidate> {
        vec![
            FetchCandidate::direct(locator),
            FetchCandidate::proxied(locator, settings),
        ]
    }
}

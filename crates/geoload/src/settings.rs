//! Process-wide proxy settings.
//!
//! Values are layered with figment: built-in defaults, then a TOML file, then
//! `GEOLOAD_`-prefixed environment variables. The result is installed once
//! with [`init`]; components still receive their own [`ProxySettings`] at
//! construction and never read the global behind the caller's back.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use geoload_fetch::{ProxySettings, is_remote};
use once_cell::sync::OnceCell;
use tracing::debug;

pub const CONFIG_FILE: &str = "geoload.toml";
pub const ENV_PREFIX: &str = "GEOLOAD_";

static SETTINGS: OnceCell<ProxySettings> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error("proxy url must be an absolute http(s) url, got {0:?}")]
    InvalidProxyUrl(String),

    #[error("proxy settings are already initialized")]
    AlreadyInitialized,
}

impl From<figment::Error> for SettingsError {
    fn from(e: figment::Error) -> Self { SettingsError::Figment(Box::new(e)) }
}

/// The provider stack, with `config` replacing the default `geoload.toml`.
pub fn figment(config: Option<&Path>) -> Figment {
    Figment::from(Serialized::defaults(ProxySettings::default()))
        .merge(Toml::file(config.unwrap_or(Path::new(CONFIG_FILE))))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Extract and validate settings from [`figment`].
pub fn load(config: Option<&Path>) -> Result<ProxySettings, SettingsError> {
    let settings: ProxySettings = figment(config).extract()?;
    validate(&settings)?;
    debug!(proxy_url = %settings.proxy_url, "loaded proxy settings");
    Ok(settings)
}

pub fn validate(settings: &ProxySettings) -> Result<(), SettingsError> {
    if is_remote(&settings.proxy_url) {
        Ok(())
    } else {
        Err(SettingsError::InvalidProxyUrl(settings.proxy_url.clone()))
    }
}

/// Install the process-wide settings. Only the first call succeeds.
pub fn init(settings: ProxySettings) -> Result<(), SettingsError> {
    SETTINGS
        .set(settings)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// The installed settings, or the defaults before [`init`].
pub fn global() -> ProxySettings { SETTINGS.get().cloned().unwrap_or_default() }

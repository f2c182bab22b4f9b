use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use home::home_dir;

pub const ROOT_VAR: &str = "GEOLOAD_ROOT";

/// On-disk layout of the CLI.
#[derive(Debug, Clone)]
pub struct GeoloadEnv {
    cache: PathBuf,
}

impl GeoloadEnv {
    /// `$GEOLOAD_ROOT`, else `~/.geoload`.
    pub fn new() -> Result<Self> {
        let root = match env::var_os(ROOT_VAR) {
            Some(root) => PathBuf::from(root),
            None => home_dir()
                .context("Failed to get home directory")?
                .join(".geoload"),
        };
        Ok(Self::from(&root))
    }

    pub fn from(root: &Path) -> Self {
        Self {
            cache: root.join("cache"),
        }
    }

    pub fn cache(&self) -> &Path { &self.cache }
}

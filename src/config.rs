//! Configuration handling for the shell

use crate::api::DEFAULT_API_BASE_URL;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const DEFAULT_REDIRECT_DELAY_MS: u64 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// User configuration for the shell
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PortalConfig {
    /// Gateway base URL, e.g. `http://localhost:8080/api/v1`
    pub api_base_url: Option<String>,
    /// Delay before redirecting to login after a password reset
    pub redirect_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    /// Location opened at startup
    pub start_route: Option<String>,
}

impl PortalConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "portal", "portal-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user's config dir
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: PortalConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to the user's config dir
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn start_route(&self) -> &str {
        self.start_route.as_deref().unwrap_or(crate::router::HOME_PATH)
    }

    /// Layer command-line values over the file values
    pub fn with_overrides(mut self, api_base_url: Option<String>, start_route: Option<String>) -> Self {
        if api_base_url.is_some() {
            self.api_base_url = api_base_url;
        }
        if start_route.is_some() {
            self.start_route = start_route;
        }
        self
    }
}

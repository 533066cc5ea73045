use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub dietary: DietaryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Settings for the external product database
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub search_page_size: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://world.openfoodfacts.org".to_string(),
            timeout_secs: 10,
            api_key: None,
            user_agent: concat!("NutriScan/", env!("CARGO_PKG_VERSION")).to_string(),
            search_page_size: 20,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Optional override of the risk keyword table, keyed by mode name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DietaryConfig {
    pub modes: Option<BTreeMap<String, Vec<String>>>,
}

impl AppConfig {
    /// Load configuration from `NUTRISCAN_CONFIG` (or `config.toml`), then apply env overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var("NUTRISCAN_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        // a blank key would be sent as an empty bearer token
        config.upstream.api_key = config.upstream.api_key.filter(|k| !k.trim().is_empty());
        Ok(config)
    }

    /// Apply `PORT`, `OPENFOODFACTS_API_KEY`, `NUTRISCAN_UPSTREAM_URL` and
    /// `NUTRISCAN_UPSTREAM_TIMEOUT_SECS` as resolved by `var`
    pub fn apply_env_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?;
        }
        if let Some(key) = var("OPENFOODFACTS_API_KEY") {
            if !key.trim().is_empty() {
                self.upstream.api_key = Some(key);
            }
        }
        if let Some(url) = var("NUTRISCAN_UPSTREAM_URL") {
            self.upstream.base_url = url;
        }
        if let Some(secs) = var("NUTRISCAN_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = secs.trim().parse().with_context(|| {
                format!("NUTRISCAN_UPSTREAM_TIMEOUT_SECS is not a number: {}", secs)
            })?;
        }
        Ok(())
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.upstream.timeout_secs == 0 {
            anyhow::bail!("upstream.timeout_secs must be greater than zero");
        }
        if self.upstream.base_url.trim().is_empty() {
            anyhow::bail!("upstream.base_url cannot be empty");
        }
        if self.upstream.search_page_size == 0 {
            anyhow::bail!("upstream.search_page_size must be greater than zero");
        }
        if let Some(modes) = &self.dietary.modes {
            if modes.is_empty() {
                anyhow::bail!("dietary.modes must define at least one mode");
            }
            for (mode, terms) in modes {
                if terms.iter().all(|t| t.trim().is_empty()) {
                    anyhow::bail!("dietary mode '{}' has no risk terms", mode);
                }
            }
        }
        Ok(())
    }
}

//! Application configuration for Helpdeck.
//!
//! User config lives at `~/.helpdeck/helpdeck.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HelpdeckError, Result};
use crate::types::HostInfo;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "helpdeck.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".helpdeck";

// ---------------------------------------------------------------------------
// Config structs (matching helpdeck.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Help content service connection settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Context/URL resolution settings.
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// `[service]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the help content service.
    #[serde(default = "default_service_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_service_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_service_url() -> String {
    "http://localhost:8080".into()
}
fn default_timeout_secs() -> u64 {
    10
}

/// `[resolver]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Which host descriptor field supplies the owner key.
    #[serde(default)]
    pub owner_source: OwnerSource,

    /// Origin of the hosting application, used to classify article URLs as
    /// relative or already fully qualified.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Deployment prefix that relative help links resolve under.
    #[serde(default = "default_base_path")]
    pub deployment_base_path: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            owner_source: OwnerSource::default(),
            origin: default_origin(),
            deployment_base_path: default_base_path(),
        }
    }
}

fn default_origin() -> String {
    "http://localhost:4200".into()
}
fn default_base_path() -> String {
    "/".into()
}

/// The owner-key deployment variant.
///
/// `product_name` is canonical; `app_id` is a deprecated alias kept for
/// deployments that still publish it. The two are never combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerSource {
    #[default]
    ProductName,
    AppId,
}

impl OwnerSource {
    /// Read the owner key from a host descriptor per this variant.
    pub fn owner_key<'a>(&self, host: &'a HostInfo) -> Option<&'a str> {
        match self {
            Self::ProductName => host.product_name.as_deref(),
            Self::AppId => host.app_id.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.helpdeck/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HelpdeckError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.helpdeck/helpdeck.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HelpdeckError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| HelpdeckError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| HelpdeckError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| HelpdeckError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| HelpdeckError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

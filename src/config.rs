//! Discovery configuration file
//!
//! Describes one node source: where to fetch it, how to request it and
//! which property paths to use. Stored as YAML, or JSON when the file has a
//! `.json` extension.
//!
//! Example format:
//! ```yaml
//! url: https://inventory.example.com/nodes
//! request:
//!   headers:
//!     Accept: application/json
//!   rejectUnauthorized: true
//! providerOptions:
//!   propertyPathId: node.uuid
//!   propertyPathIpPrivate: node.ips.0
//!   propertyPathIpPublic: node.ips.1
//! ```

use crate::client::RequestOptions;
use crate::provider::options::{PROPERTY_PATH_ID, PROPERTY_PATH_IP_PRIVATE, PROPERTY_PATH_IP_PUBLIC};
use crate::provider::{InitOptions, ProviderOptions};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`DiscoveryConfig::url`]
pub const URL_ENV: &str = "NODES_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    /// Inventory endpoint returning a JSON array
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub request: RequestOptions,
    pub provider_options: ProviderOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_options: Option<InitOptions>,
}

impl DiscoveryConfig {
    /// A starter configuration pointing at a placeholder URL
    pub fn example() -> Self {
        Self {
            url: Some("https://inventory.example.com/nodes".to_string()),
            request: RequestOptions::default().header("Accept", "application/json"),
            provider_options: ProviderOptions::new()
                .with(PROPERTY_PATH_ID, "node.uuid")
                .with(PROPERTY_PATH_IP_PRIVATE, "node.ips.0")
                .with(PROPERTY_PATH_IP_PUBLIC, "node.ips.1"),
            init_options: None,
        }
    }

    /// Read a config file, choosing JSON or YAML from the extension
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read discovery config: {}", path.display()))?;

        let config = if is_json(path) {
            serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse discovery config JSON: {}", path.display())
            })?
        } else {
            serde_yaml::from_str(&content).with_context(|| {
                format!("Failed to parse discovery config YAML: {}", path.display())
            })?
        };

        Ok(config)
    }

    /// Write the config file, creating parent directories as needed
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self).context("Failed to serialize discovery config")?
        } else {
            serde_yaml::to_string(self).context("Failed to serialize discovery config")?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write discovery config: {}", path.display()))?;

        log::debug!("Wrote discovery config to {}", path.display());
        Ok(())
    }

    /// The URL to fetch, preferring `NODES_URL` over the file
    pub fn resolve_url(&self) -> Result<String> {
        if let Ok(url) = std::env::var(URL_ENV) {
            log::debug!("Using {} from environment", URL_ENV);
            return Ok(url);
        }
        self.url.clone().ok_or_else(|| {
            eyre::eyre!(
                "No inventory URL: set `url` in the config or the {} environment variable",
                URL_ENV
            )
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

//! CLI helper functions

use crate::{
    PropertyPath,
    client::{Auth, Fetcher, HttpFetcher},
    config::DiscoveryConfig,
    etl::Pipeline,
    output::{NodeFormat, NodeWriter},
    provider::{NodeMapper, PropertyPaths, RecordSource},
};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Prefix of the credential environment variables
///
/// - NODES_APIKEY: API key (optional)
/// - NODES_USERNAME / NODES_PASSWORD: Basic auth (optional)
/// - NODES_TOKEN: Bearer token (optional)
pub const ENV_PREFIX: &str = "NODES";

/// Options for a discovery run
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
    pub format: NodeFormat,
    /// Drop nodes missing an id or private address
    pub complete_only: bool,
    /// Accept invalid TLS certificates regardless of the config
    pub insecure: bool,
}

/// Build the HTTP fetcher from `NODES_*` environment variables
pub fn load_fetcher() -> Result<HttpFetcher> {
    let auth = Auth::from_env(ENV_PREFIX);
    log::debug!("Using {} authentication", auth);
    HttpFetcher::try_new(auth).context("Failed to create HTTP fetcher")
}

/// Discover nodes described by the config at `config_path`
///
/// Pipeline: RecordSource → NodeMapper → NodeWriter
///
/// The provider options are validated before anything is fetched.
pub async fn discover(config_path: impl AsRef<Path>, options: &DiscoverOptions) -> Result<usize> {
    let fetcher = load_fetcher()?;
    discover_with(fetcher, config_path, options).await
}

/// [`discover`] with a caller-supplied fetcher
pub async fn discover_with<F: Fetcher>(
    fetcher: F,
    config_path: impl AsRef<Path>,
    options: &DiscoverOptions,
) -> Result<usize> {
    let config_path = config_path.as_ref();
    log::info!("Loading discovery config from {}", config_path.display());
    let config = DiscoveryConfig::read(config_path)?;
    let url = config.resolve_url()?;

    let mut request = config.request.clone();
    if options.insecure {
        log::warn!("TLS certificate verification disabled");
        request.reject_unauthorized = false;
    }

    let paths = PropertyPaths::from_options(&config.provider_options)
        .context("Invalid provider options")?;

    let writer = match &options.output {
        Some(path) => NodeWriter::file(path),
        None => NodeWriter::stdout(),
    }
    .format(options.format)
    .complete_only(options.complete_only);

    log::info!("Discovering nodes from {}", url);
    let pipeline = Pipeline::new(
        RecordSource::new(&fetcher, url.as_str(), request),
        NodeMapper::new(paths),
        writer,
    );
    let count = pipeline
        .run()
        .await
        .with_context(|| format!("Failed to discover nodes from {}", url))?;

    log::info!("✓ Discovered {} node(s)", count);
    Ok(count)
}

/// Compile property paths for inspection
pub fn compile_paths<S: AsRef<str>>(raw_paths: &[S]) -> Vec<(String, PropertyPath)> {
    raw_paths
        .iter()
        .map(|raw| (raw.as_ref().to_string(), PropertyPath::compile(raw.as_ref())))
        .collect()
}

/// Validate the provider options of a config file without fetching
pub fn check_config(config_path: impl AsRef<Path>) -> Result<PropertyPaths> {
    let config = DiscoveryConfig::read(config_path)?;
    PropertyPaths::from_options(&config.provider_options).context("Invalid provider options")
}

/// Write a starter config file, refusing to overwrite unless `force`
pub fn init_config(path: impl AsRef<Path>, force: bool) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        eyre::bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }
    DiscoveryConfig::example().write(path)?;
    log::info!("✓ Wrote starter config to {}", path.display());
    Ok(())
}

//! Generic node provider
//!
//! Discovers nodes from any endpoint returning a JSON array, using property
//! paths from the provider options to locate each node's id and addresses.

use super::source::fetch_records;
use super::{ConfigurationError, InitOptions, Node, NodeMapper, PropertyPaths, ProviderOptions};
use crate::client::{Fetcher, RequestOptions};
use crate::etl::Transformer;
use eyre::Result;

/// Provider configuration captured by [`GenericNodeProvider::initialize`]
#[derive(Debug, Clone)]
struct Initialized {
    provider_options: ProviderOptions,
    init_options: Option<InitOptions>,
    mapper: NodeMapper,
}

/// Node provider for arbitrary JSON inventories
///
/// The provider starts uninitialized. [`initialize`](Self::initialize)
/// compiles the property paths; after that any number of
/// [`get_nodes_from_uri`](Self::get_nodes_from_uri) calls may run
/// concurrently since they only read the compiled paths.
///
/// # Example
/// ```no_run
/// use generic_node_provider::client::{Auth, HttpFetcher, RequestOptions};
/// use generic_node_provider::{GenericNodeProvider, ProviderOptions};
///
/// # async fn example() -> eyre::Result<()> {
/// let mut provider = GenericNodeProvider::new(HttpFetcher::try_new(Auth::None)?);
/// provider.initialize(
///     ProviderOptions::new()
///         .with("propertyPathId", "node.uuid")
///         .with("propertyPathIpPrivate", "node.ips.0")
///         .with("propertyPathIpPublic", "node.ips.1"),
///     None,
/// )?;
///
/// let nodes = provider
///     .get_nodes_from_uri("https://inventory.example.com/nodes", &RequestOptions::default())
///     .await?;
/// for node in nodes.iter().filter(|n| n.is_complete()) {
///     println!("{:?} -> {:?}", node.id, node.ip.private);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GenericNodeProvider<F> {
    fetcher: F,
    state: Option<Initialized>,
}

impl<F: Fetcher> GenericNodeProvider<F> {
    /// Create an uninitialized provider fetching through `fetcher`
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: None,
        }
    }

    /// Validate the provider options and compile the property paths
    ///
    /// Calling this again replaces the previous configuration. On error the
    /// previous configuration, if any, is kept.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] when `propertyPathId` or
    /// `propertyPathIpPrivate` is missing, or when any property path is not
    /// a string.
    pub fn initialize(
        &mut self,
        provider_options: ProviderOptions,
        init_options: Option<InitOptions>,
    ) -> Result<(), ConfigurationError> {
        let paths = PropertyPaths::from_options(&provider_options)?;
        log::debug!(
            "Initialized provider with paths id='{}' private='{}' public='{}'",
            paths.id,
            paths.ip_private,
            paths.ip_public
        );

        self.state = Some(Initialized {
            provider_options,
            init_options,
            mapper: NodeMapper::new(paths),
        });
        Ok(())
    }

    /// Fetch `url` and extract one node per record, in order
    ///
    /// Records whose paths do not resolve still produce a node, with the
    /// unresolved fields left empty.
    ///
    /// # Errors
    /// - Any error from the fetcher, unchanged
    /// - [`ResponseFormatError`](super::ResponseFormatError) when the body is
    ///   not JSON or not an array
    /// - [`ConfigurationError::NotInitialized`] when the body is valid but
    ///   the provider was never initialized
    pub async fn get_nodes_from_uri(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Node>> {
        let records = fetch_records(&self.fetcher, url, options).await?;
        let mapper = self.mapper().ok_or(ConfigurationError::NotInitialized)?;
        let nodes = mapper.transform_many(records)?;
        log::debug!("Extracted {} nodes from {}", nodes.len(), url);
        Ok(nodes)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Provider options as given to `initialize`
    pub fn provider_options(&self) -> Option<&ProviderOptions> {
        self.state.as_ref().map(|s| &s.provider_options)
    }

    /// Init options as given to `initialize`
    pub fn init_options(&self) -> Option<&InitOptions> {
        self.state.as_ref().and_then(|s| s.init_options.as_ref())
    }

    /// Compiled property paths
    pub fn property_paths(&self) -> Option<&PropertyPaths> {
        self.mapper().map(NodeMapper::paths)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn mapper(&self) -> Option<&NodeMapper> {
        self.state.as_ref().map(|s| &s.mapper)
    }
}

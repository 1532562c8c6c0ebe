//! Fetcher capability used by the node provider

use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Options for a single fetch
///
/// Serialized in camelCase so it can be written directly in a discovery
/// config file. Keys other than `headers` and `rejectUnauthorized` are
/// kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Verify the server's TLS certificate
    #[serde(default = "default_reject_unauthorized")]
    pub reject_unauthorized: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_reject_unauthorized() -> bool {
    true
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: BTreeMap::new(),
            reject_unauthorized: true,
            extra: Map::new(),
        }
    }
}

impl RequestOptions {
    /// Add a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set whether invalid TLS certificates are rejected
    pub fn reject_unauthorized(mut self, reject: bool) -> Self {
        self.reject_unauthorized = reject;
        self
    }
}

/// Body returned by a [`Fetcher`]
///
/// Transports that already decoded JSON hand back [`FetchedBody::Json`];
/// everything else is passed through as text for the provider to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedBody {
    Text(String),
    Json(Value),
}

impl From<String> for FetchedBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FetchedBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for FetchedBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Capability to retrieve the raw node document from a URL
///
/// Errors are returned to the provider's caller as-is.
///
/// # Example
/// ```no_run
/// use generic_node_provider::client::{FetchedBody, Fetcher, RequestOptions};
/// use eyre::Result;
///
/// struct StaticFetcher(String);
///
/// impl Fetcher for StaticFetcher {
///     async fn fetch(&self, _url: &str, _options: &RequestOptions) -> Result<FetchedBody> {
///         Ok(FetchedBody::Text(self.0.clone()))
///     }
/// }
/// ```
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url`
    ///
    /// # Errors
    /// Returns an error if the document cannot be retrieved (network, TLS, status, etc.)
    fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> impl std::future::Future<Output = Result<FetchedBody>> + Send;
}

//! Generic Node Provider
//!
//! Discovers service nodes from any endpoint that returns a JSON array,
//! using dotted property paths to locate each node's id and addresses.

pub mod cli;
pub mod client;
pub mod config;
pub mod etl;
pub mod output;
pub mod path;
pub mod provider;

// Re-exports for convenience
pub use client::{Auth, FetchedBody, Fetcher, HttpFetcher, RequestOptions};
pub use config::DiscoveryConfig;
pub use path::PropertyPath;
pub use provider::{
    ConfigurationError, GenericNodeProvider, InitOptions, Node, NodeIp, PropertyPaths,
    ProviderOptions, ResponseFormatError,
};

//! Errors raised by the node provider

use thiserror::Error;

/// Problems with the provider's configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required property path key is absent from the provider options
    #[error("ProviderOptions.{0} required")]
    Missing(&'static str),

    /// A property path key is present but its value is not a string
    #[error("ProviderOptions.{0} must be a string")]
    NotAString(&'static str),

    /// Nodes were requested before `initialize` succeeded
    #[error("Provider is not initialized, call initialize with provider options first")]
    NotInitialized,
}

/// The fetched document does not have the shape of a node list
#[derive(Debug, Error)]
pub enum ResponseFormatError {
    /// Text body is not valid JSON
    #[error("Data must parse to a JSON array: {0}")]
    Unparseable(#[source] serde_json::Error),

    /// Valid JSON, but not an array
    #[error("Data must be a JSON array, got {0}")]
    NotAnArray(&'static str),
}

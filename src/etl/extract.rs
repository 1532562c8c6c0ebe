//! Extractor trait for pulling records from a source

use eyre::Result;

/// Extracts a batch of items from a source
///
/// # Example
/// ```no_run
/// use generic_node_provider::etl::Extractor;
/// use eyre::Result;
/// use serde_json::{Value, json};
///
/// struct FixedRecords(Vec<Value>);
///
/// impl Extractor for FixedRecords {
///     type Item = Value;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, parsing, shape, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}

//! Loader trait for writing results to a destination

use eyre::Result;

/// Loads a batch of items into a destination
///
/// Returns the number of items actually written, which may be lower than
/// the batch size when the loader filters.
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// # Errors
    /// Returns an error if writing fails
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}

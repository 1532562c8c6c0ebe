//! Pipeline wiring an extractor, a transformer and a loader together

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// Runs Extract, Transform and Load in sequence
///
/// # Example
/// ```no_run
/// use generic_node_provider::client::{HttpFetcher, Auth, RequestOptions};
/// use generic_node_provider::etl::Pipeline;
/// use generic_node_provider::output::NodeWriter;
/// use generic_node_provider::provider::{NodeMapper, RecordSource};
/// use generic_node_provider::{PropertyPaths, ProviderOptions};
///
/// # async fn example() -> eyre::Result<()> {
/// let options = ProviderOptions::new()
///     .with("propertyPathId", "node.uuid")
///     .with("propertyPathIpPrivate", "node.ips.0");
/// let paths = PropertyPaths::from_options(&options)?;
///
/// let fetcher = HttpFetcher::try_new(Auth::None)?;
/// let url = "https://inventory.example.com/nodes";
/// let pipeline = Pipeline::new(
///     RecordSource::new(&fetcher, url, RequestOptions::default()),
///     NodeMapper::new(paths),
///     NodeWriter::stdout(),
/// );
///
/// let count = pipeline.run().await?;
/// println!("Wrote {} nodes", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the pipeline and return the number of items loaded
    ///
    /// An empty extraction still reaches the loader, so an empty node list
    /// is written rather than nothing at all.
    ///
    /// # Errors
    /// Returns the first error raised by any stage
    pub async fn run(&self) -> Result<usize> {
        log::debug!("Extracting records...");
        let items = self.extractor.extract().await?;
        log::info!("Extracted {} records", items.len());

        let transformed = self.transformer.transform_many(items)?;
        log::debug!("Transformed {} records", transformed.len());

        let count = self.loader.load(transformed).await?;
        log::info!("Loaded {} items", count);

        Ok(count)
    }
}

//! Record extraction from a node inventory URL

use super::parse_records;
use crate::client::{Fetcher, RequestOptions};
use crate::etl::Extractor;
use eyre::Result;
use serde_json::Value;

/// Fetch `url` and validate the body into a list of records
///
/// Fetcher errors come back untouched; format problems surface as a
/// [`ResponseFormatError`](super::ResponseFormatError) inside the report.
pub(crate) async fn fetch_records<F: Fetcher>(
    fetcher: &F,
    url: &str,
    options: &RequestOptions,
) -> Result<Vec<Value>> {
    let body = fetcher.fetch(url, options).await?;
    let records = parse_records(body)?;
    log::debug!("Fetched {} records from {}", records.len(), url);
    Ok(records)
}

/// Extractor yielding the raw records behind one URL
pub struct RecordSource<'a, F> {
    fetcher: &'a F,
    url: String,
    options: RequestOptions,
}

impl<'a, F: Fetcher> RecordSource<'a, F> {
    pub fn new(fetcher: &'a F, url: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            fetcher,
            url: url.into(),
            options,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<F: Fetcher> Extractor for RecordSource<'_, F> {
    type Item = Value;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        fetch_records(self.fetcher, &self.url, &self.options).await
    }
}

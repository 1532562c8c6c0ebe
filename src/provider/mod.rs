//! Node extraction from JSON inventories
//!
//! [`GenericNodeProvider`] fetches a document, checks that it is a JSON
//! array and maps each record to a [`Node`] with the configured property
//! paths. The same steps are exposed as ETL parts ([`RecordSource`],
//! [`NodeMapper`]) for use in a [`Pipeline`](crate::etl::Pipeline).

mod error;
mod generic;
mod mapper;
mod node;
pub mod options;
mod response;
mod source;

pub use error::{ConfigurationError, ResponseFormatError};
pub use generic::GenericNodeProvider;
pub use mapper::NodeMapper;
pub use node::{Node, NodeIp};
pub use options::{InitOptions, PropertyPaths, ProviderOptions};
pub use response::parse_records;
pub use source::RecordSource;

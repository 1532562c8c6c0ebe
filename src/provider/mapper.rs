//! Record to node mapping

use super::{Node, PropertyPaths};
use crate::etl::Transformer;
use eyre::Result;
use serde_json::Value;

/// Maps raw records to [`Node`]s using compiled property paths
///
/// Each field is resolved independently; a field whose path does not
/// resolve is left empty and never fails the batch.
///
/// # Example
/// ```
/// use generic_node_provider::provider::NodeMapper;
/// use generic_node_provider::{PropertyPath, PropertyPaths};
/// use serde_json::json;
///
/// let mapper = NodeMapper::new(PropertyPaths {
///     id: PropertyPath::compile("name"),
///     ip_private: PropertyPath::compile("addr"),
///     ip_public: PropertyPath::compile("nat"),
/// });
///
/// let node = mapper.map(&json!({"name": "db-1", "addr": "10.0.0.5"}));
/// assert_eq!(node.id, Some(json!("db-1")));
/// assert_eq!(node.ip.public, None);
/// ```
#[derive(Debug, Clone)]
pub struct NodeMapper {
    paths: PropertyPaths,
}

impl NodeMapper {
    pub fn new(paths: PropertyPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PropertyPaths {
        &self.paths
    }

    /// Resolve every field of a node from `record`
    pub fn map(&self, record: &Value) -> Node {
        let resolve = |path: &crate::PropertyPath| path.resolve(record).cloned();
        let node = Node::new(
            resolve(&self.paths.id),
            resolve(&self.paths.ip_public),
            resolve(&self.paths.ip_private),
        );
        log::trace!(
            "Resolved node id={:?} private={:?} public={:?}",
            node.id,
            node.ip.private,
            node.ip.public
        );
        node
    }
}

impl Transformer for NodeMapper {
    type Input = Value;
    type Output = Node;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        Ok(self.map(&input))
    }
}

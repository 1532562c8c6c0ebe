//! Node list writer for files and stdout

use crate::etl::Loader;
use crate::provider::Node;
use clap::ValueEnum;
use eyre::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Serialization used by [`NodeWriter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NodeFormat {
    /// A single pretty-printed JSON array
    #[default]
    Json,
    /// One compact JSON node per line
    Ndjson,
}

/// Writes nodes to a file, or to stdout when no path is set
///
/// Optionally drops nodes that are missing an id or private address; the
/// provider itself never filters, so this is where callers opt in.
#[derive(Debug, Clone, Default)]
pub struct NodeWriter {
    path: Option<PathBuf>,
    format: NodeFormat,
    complete_only: bool,
}

impl NodeWriter {
    pub fn stdout() -> Self {
        Self::default()
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: NodeFormat) -> Self {
        self.format = format;
        self
    }

    /// Skip nodes for which [`Node::is_complete`] is false
    pub fn complete_only(mut self, complete_only: bool) -> Self {
        self.complete_only = complete_only;
        self
    }

    /// Render nodes in the configured format
    pub fn render(&self, nodes: &[Node]) -> Result<String> {
        match self.format {
            NodeFormat::Json => {
                let mut json = serde_json::to_string_pretty(nodes)
                    .context("Failed to serialize nodes")?;
                json.push('\n');
                Ok(json)
            }
            NodeFormat::Ndjson => {
                let mut out = String::new();
                for node in nodes {
                    out.push_str(&serde_json::to_string(node).context("Failed to serialize node")?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    fn retain(&self, nodes: Vec<Node>) -> Vec<Node> {
        if !self.complete_only {
            return nodes;
        }
        nodes
            .into_iter()
            .enumerate()
            .filter_map(|(index, node)| {
                if node.is_complete() {
                    Some(node)
                } else {
                    log::warn!("Skipping incomplete node at index {}: {:?}", index, node);
                    None
                }
            })
            .collect()
    }

    fn write(&self, content: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write nodes file: {}", path.display()))
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .context("Failed to write nodes to stdout")?;
                stdout.flush().context("Failed to flush stdout")
            }
        }
    }
}

impl Loader for NodeWriter {
    type Item = Node;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        let nodes = self.retain(items);
        let content = self.render(&nodes)?;
        self.write(&content)?;
        Ok(nodes.len())
    }
}

//! Property path compilation and traversal
//!
//! A property path is a dotted string such as `node.ips.0` naming the keys
//! (and array indices) to follow inside a JSON record. Paths are compiled
//! once into a token list and then resolved against every fetched record.

use serde_json::Value;
use std::fmt;

/// A compiled property path
///
/// The empty path is the root of the record: resolving it yields the
/// record itself.
///
/// # Example
/// ```
/// use generic_node_provider::PropertyPath;
/// use serde_json::json;
///
/// let path = PropertyPath::compile("node.ips.0");
/// assert_eq!(path.tokens(), ["node", "ips", "0"]);
///
/// let record = json!({"node": {"ips": ["10.0.0.1", "1.2.3.4"]}});
/// assert_eq!(path.resolve(&record), Some(&json!("10.0.0.1")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    tokens: Vec<String>,
}

impl PropertyPath {
    /// Compile a dotted path string into traversal tokens
    ///
    /// Tokens are not validated; a token that names nothing simply fails to
    /// resolve later.
    pub fn compile(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::root();
        }
        Self {
            tokens: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// The empty path, resolving to the whole record
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Check whether this path resolves to the whole record
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Follow the path inside `record`
    ///
    /// Returns `None` as soon as the current value cannot be indexed by the
    /// next token: a scalar or null, a missing object key, or an array index
    /// that is out of bounds or not written in canonical decimal form.
    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record;
        for token in &self.tokens {
            current = match current {
                Value::Object(map) => map.get(token)?,
                Value::Array(items) => items.get(array_index(token)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Parse an array index, accepting only `0` or digits without a leading zero
fn array_index(token: &str) -> Option<usize> {
    let canonical = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if canonical { token.parse().ok() } else { None }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join("."))
    }
}

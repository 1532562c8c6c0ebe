//! Provider options and the compiled property path table

use super::ConfigurationError;
use crate::path::PropertyPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PROPERTY_PATH_ID: &str = "propertyPathId";
pub const PROPERTY_PATH_IP_PRIVATE: &str = "propertyPathIpPrivate";
pub const PROPERTY_PATH_IP_PUBLIC: &str = "propertyPathIpPublic";

/// Opaque options stored for the caller; the provider never reads them
pub type InitOptions = Map<String, Value>;

/// Caller supplied provider options
///
/// Must hold `propertyPathId` and `propertyPathIpPrivate` as strings and may
/// hold `propertyPathIpPublic`. Every other key is kept verbatim.
///
/// # Example
/// ```
/// use generic_node_provider::ProviderOptions;
///
/// let options = ProviderOptions::new()
///     .with("propertyPathId", "node.uuid")
///     .with("propertyPathIpPrivate", "node.ips.0")
///     .with("region", "us-east-1");
///
/// assert_eq!(options.get_str("region"), Some("us-east-1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOptions(Map<String, Value>);

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Remove a key, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Look up a property path key that must be present
    fn required_path(&self, key: &'static str) -> Result<&str, ConfigurationError> {
        match self.0.get(key) {
            None => Err(ConfigurationError::Missing(key)),
            Some(Value::String(raw)) => Ok(raw),
            Some(_) => Err(ConfigurationError::NotAString(key)),
        }
    }

    /// Look up a property path key that may be absent
    fn optional_path(&self, key: &'static str) -> Result<&str, ConfigurationError> {
        match self.0.get(key) {
            None => Ok(""),
            Some(Value::String(raw)) => Ok(raw),
            Some(_) => Err(ConfigurationError::NotAString(key)),
        }
    }
}

impl From<Map<String, Value>> for ProviderOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Compiled property paths, one per node field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPaths {
    pub id: PropertyPath,
    pub ip_private: PropertyPath,
    pub ip_public: PropertyPath,
}

impl PropertyPaths {
    /// Compile the paths held in `options`
    ///
    /// `propertyPathId` is checked before `propertyPathIpPrivate`. An absent
    /// `propertyPathIpPublic` compiles to the root path, the same as an
    /// explicit empty string.
    ///
    /// # Errors
    /// Returns [`ConfigurationError`] naming the first missing or non-string key.
    pub fn from_options(options: &ProviderOptions) -> Result<Self, ConfigurationError> {
        let id = options.required_path(PROPERTY_PATH_ID)?;
        let ip_private = options.required_path(PROPERTY_PATH_IP_PRIVATE)?;
        let ip_public = options.optional_path(PROPERTY_PATH_IP_PUBLIC)?;

        Ok(Self {
            id: PropertyPath::compile(id),
            ip_private: PropertyPath::compile(ip_private),
            ip_public: PropertyPath::compile(ip_public),
        })
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A discovered node
///
/// Fields hold whatever JSON value the property paths resolved to, without
/// coercion. Unresolved fields are `None` and left out of the serialized
/// form, so a record with nothing resolvable serializes as `{"ip":{}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
    #[serde(default)]
    pub ip: NodeIp,
}

/// Public and private addresses of a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeIp {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub public: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub private: Option<Value>,
}

/// A key that is present is `Some`, even when its value is `null`
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl Node {
    pub fn new(id: Option<Value>, public: Option<Value>, private: Option<Value>) -> Self {
        Self {
            id,
            ip: NodeIp { public, private },
        }
    }

    /// A node is usable when it has a non-null id and private address
    pub fn is_complete(&self) -> bool {
        matches!(&self.id, Some(v) if !v.is_null())
            && matches!(&self.ip.private, Some(v) if !v.is_null())
    }

    /// The id as a string, when it resolved to one
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }
}

//! Secret payloads and per-call options.

use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque secret payload. Adapters store and return it verbatim.
pub type SecretValue = Value;

static NULL: Value = Value::Null;

/// A secret as returned by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    key: String,
    value: SecretValue,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

impl Secret {
    pub fn new(key: impl Into<String>, value: impl Into<SecretValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &SecretValue {
        &self.value
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn into_value(self) -> SecretValue {
        self.value
    }

    /// Look up a field when the value is a mapping.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.value.as_object()?.get(field)
    }
}

/// `secret["field"]` yields `Value::Null` for missing fields or non-mapping values.
impl Index<&str> for Secret {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        self.get(field).unwrap_or(&NULL)
    }
}

/// Options accompanying a backend call.
///
/// `ttl` (seconds) is consumed by caching adapters. Everything in `extra`
/// is forwarded to the backend untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecretOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecretOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, secs: u64) -> Self {
        self.ttl = Some(secs);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Remove the TTL, returning it alongside the options left for the backend.
    pub fn split_ttl(mut self) -> (Option<u64>, SecretOptions) {
        let ttl = self.ttl.take();
        (ttl, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_field_access() {
        let secret = Secret::new("baz", json!({"foo": "foobar"}));
        assert_eq!(secret.get("foo"), Some(&json!("foobar")));
        assert_eq!(secret["foo"], "foobar");
        assert!(secret["missing"].is_null());
    }

    #[test]
    fn test_secret_index_on_scalar_value_is_null() {
        let secret = Secret::new("token", "s3cr3t");
        assert!(secret.get("foo").is_none());
        assert!(secret["foo"].is_null());
        assert_eq!(secret.value(), &json!("s3cr3t"));
    }

    #[test]
    fn test_secret_json_omits_empty_metadata() {
        let secret = Secret::new("k", json!(1));
        let encoded = serde_json::to_value(&secret).unwrap();
        assert_eq!(encoded, json!({"key": "k", "value": 1}));

        let tagged = secret.with_metadata("version", 3);
        let encoded = serde_json::to_value(&tagged).unwrap();
        assert_eq!(encoded["metadata"]["version"], 3);
    }

    #[test]
    fn test_split_ttl_keeps_extra_options() {
        let options = SecretOptions::new().with_ttl(60).with("mount", "kv");
        let (ttl, rest) = options.split_ttl();
        assert_eq!(ttl, Some(60));
        assert!(rest.ttl.is_none());
        assert_eq!(rest.extra.get("mount"), Some(&json!("kv")));
    }

    #[test]
    fn test_options_deserialize_flat_form() {
        let options: SecretOptions =
            serde_json::from_value(json!({"ttl": 30, "mount": "kv", "version": 2})).unwrap();
        assert_eq!(options.ttl, Some(30));
        assert_eq!(options.extra.len(), 2);
        assert_eq!(options.extra["version"], 2);

        let bare: SecretOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(bare, SecretOptions::default());
    }
}

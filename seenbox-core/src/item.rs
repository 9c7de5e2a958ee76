//! Items persisted through the gateway.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Key;

/// A record that can be persisted through the gateway.
///
/// Only the [`Key`] participates in deduplication; everything else about the
/// item is opaque to seenbox and is handed to the backend untouched.
pub trait Item: Send + Sync {
    /// Returns the identifier used to decide whether this item was already saved.
    fn key(&self) -> &Key;
}

impl<T> Item for &T
where
    T: Item + ?Sized,
{
    fn key(&self) -> &Key {
        (**self).key()
    }
}

impl<T> Item for Box<T>
where
    T: Item + ?Sized,
{
    fn key(&self) -> &Key {
        (**self).key()
    }
}

/// General purpose item: a key plus an arbitrary JSON payload.
///
/// The payload fields are flattened next to `key` when serialized, so a
/// record stored in a document database looks like
/// `{"key": "...", "title": "...", "size": 42}`.
///
/// # Example
/// ```
/// use seenbox_core::{Item, Record};
/// use serde_json::json;
///
/// let record = Record::new("a1b2").with("title", json!("untitled"));
/// assert_eq!(record.key().as_str(), "a1b2");
/// assert_eq!(record.get("title"), Some(&json!("untitled")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    key: Key,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Record {
    /// Creates a record with an empty payload.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            payload: Map::new(),
        }
    }

    /// Adds a payload field, replacing any previous value under the same name.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(field.into(), value.into());
        self
    }

    /// Returns a payload field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// Returns the whole payload.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

impl Item for Record {
    fn key(&self) -> &Key {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_is_flattened() {
        let record = Record::new("k1").with("title", "hello").with("size", 42);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"key": "k1", "title": "hello", "size": 42}));
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let record: Record =
            serde_json::from_value(json!({"key": "k2", "syntax": "rust"})).unwrap();
        assert_eq!(record.key(), &Key::new("k2"));
        assert_eq!(record.get("syntax"), Some(&json!("rust")));
    }

    #[test]
    fn test_payload_excludes_key_and_keeps_order() {
        let record = Record::new("k3").with("title", "t").with("syntax", "rust");
        let fields: Vec<&str> = record.payload().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["title", "syntax"]);
    }
}

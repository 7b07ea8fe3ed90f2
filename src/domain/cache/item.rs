//! Derived key/value pairs

use serde::{Deserialize, Serialize};

/// A cache key paired with the serialized form of the value it identifies
///
/// Items are derived on demand and never retained; writing them to a
/// store, and with which semantics, is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheItem {
    pub key: String,
    pub value: String,
}

impl CacheItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl From<CacheItem> for (String, String) {
    fn from(item: CacheItem) -> Self {
        item.into_pair()
    }
}

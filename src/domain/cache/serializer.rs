//! JSON serialization of cached values

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::value_tree::to_value_without_null_fields;
use crate::domain::DomainError;

/// How null values are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullValueHandling {
    /// Null members are written as `null`
    Include,
    /// Null struct fields are left out; map entries and enum payloads keep
    /// their nulls
    #[default]
    Ignore,
}

/// Culture used when formatting numbers and dates
///
/// JSON produced by `serde_json` is always culture invariant; a named culture
/// is carried for concrete caches that format values themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Culture {
    #[default]
    Invariant,
    Named(String),
}

impl Culture {
    pub fn tag(&self) -> &str {
        match self {
            Culture::Invariant => "",
            Culture::Named(tag) => tag,
        }
    }
}

/// Settings applied when serializing and deserializing cached values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    pub null_value_handling: NullValueHandling,
    pub culture: Culture,
}

impl SerializerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = handling;
        self
    }

    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Serializes a value to JSON text
    ///
    /// The culture does not change the output: numbers and dates are always
    /// written in their invariant JSON form.
    pub fn serialize<V: Serialize + ?Sized>(&self, value: &V) -> Result<String, DomainError> {
        match self.null_value_handling {
            NullValueHandling::Include => Ok(serde_json::to_string(value)?),
            NullValueHandling::Ignore => {
                let tree = to_value_without_null_fields(value)?;
                Ok(serde_json::to_string(&tree)?)
            }
        }
    }

    /// Deserializes JSON text written with these settings
    pub fn deserialize<V: DeserializeOwned>(&self, data: &str) -> Result<V, DomainError> {
        Ok(serde_json::from_str(data)?)
    }
}

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Error raised when an instance resolves to a blank key value
    pub fn empty_key() -> Self {
        Self::configuration("Object key cannot be null or empty")
    }

    /// Error raised when no usable store handle could be obtained
    pub fn no_store() -> Self {
        Self::store_unavailable("Cannot find cache store service")
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_error() {
        let error = DomainError::empty_key();
        assert!(error.is_configuration());
        assert_eq!(
            error.to_string(),
            "Configuration error: Object key cannot be null or empty"
        );
    }

    #[test]
    fn test_no_store_error() {
        let error = DomainError::no_store();
        assert!(error.is_store_unavailable());
        assert_eq!(
            error.to_string(),
            "Store unavailable: Cannot find cache store service"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let error: DomainError = err.into();
        assert!(matches!(error, DomainError::Serialization { .. }));
    }
}

use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::SerializerSettings;

/// Default database index
pub const DEFAULT_DATABASE: i64 = 0;

/// Default item expiration in milliseconds
pub const DEFAULT_EXPIRATION_MS: u64 = 5_000;

/// Configuration bound to a cache facade at construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Prefix for every key of the cache, left out when blank
    pub domain: Option<String>,
    /// Database number of the store the cache lives in
    pub database: i64,
    /// Default item expiration in milliseconds
    pub expiration_ms: u64,
    pub serializer: SerializerSettings,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            domain: None,
            database: DEFAULT_DATABASE,
            expiration_ms: DEFAULT_EXPIRATION_MS,
            serializer: SerializerSettings::default(),
        }
    }
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_database(mut self, database: i64) -> Self {
        self.database = database;
        self
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration_ms = u64::try_from(expiration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_serializer(mut self, serializer: SerializerSettings) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn expiration(&self) -> Duration {
        Duration::from_millis(self.expiration_ms)
    }
}

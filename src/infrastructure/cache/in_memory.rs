//! In-memory store using moka

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::cache::{Cache, StoreConnection};
use crate::domain::DomainError;

/// Number of databases an in-memory connection exposes by default
pub const DEFAULT_DATABASE_COUNT: usize = 16;

/// Configuration for one in-memory database
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// One numbered in-memory database
///
/// Expiry is tracked per entry and checked on access; moka bounds the
/// number of entries.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    entries: MokaCache<String, Entry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        Self {
            entries: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX)
    }

    /// Expiration timestamp for an entry written now, saturating on huge TTLs
    fn expires_at(ttl: Duration) -> u64 {
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        Self::current_time_millis().saturating_add(ttl_millis)
    }

    /// Live entry for a key; expired entries are dropped
    async fn live(&self, key: &str) -> Option<Entry> {
        let entry = self.entries.get(key).await?;

        if Self::current_time_millis() >= entry.expires_at {
            self.entries.remove(key).await;
            return None;
        }

        Some(entry)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live(key).await.map(|entry| entry.data))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let entry = Entry {
            data: value.to_string(),
            expires_at: Self::expires_at(ttl),
        };

        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.live(key).await.is_some() && self.entries.remove(key).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.live(key).await.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        match self.live(key).await {
            Some(entry) => {
                let renewed = Entry {
                    expires_at: Self::expires_at(ttl),
                    ..entry
                };
                self.entries.insert(key.to_string(), renewed).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        Ok(self.live(key).await.map(|entry| {
            Duration::from_millis(entry.expires_at.saturating_sub(Self::current_time_millis()))
        }))
    }
}

/// Connection to a fixed set of numbered in-memory databases
#[derive(Debug, Clone)]
pub struct InMemoryConnection {
    databases: Vec<Arc<InMemoryCache>>,
}

impl InMemoryConnection {
    pub fn new() -> Self {
        Self::with_databases(DEFAULT_DATABASE_COUNT, InMemoryCacheConfig::default())
    }

    pub fn with_databases(count: usize, config: InMemoryCacheConfig) -> Self {
        debug!(databases = count, "Creating in-memory store connection");

        Self {
            databases: (0..count)
                .map(|_| Arc::new(InMemoryCache::with_config(config.clone())))
                .collect(),
        }
    }

    pub fn database_count(&self) -> usize {
        self.databases.len()
    }
}

impl Default for InMemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConnection for InMemoryConnection {
    fn database(&self, index: i64) -> Option<Arc<dyn Cache>> {
        let index = usize::try_from(index).ok()?;

        self.databases
            .get(index)
            .map(|db| Arc::clone(db) as Arc<dyn Cache>)
    }
}

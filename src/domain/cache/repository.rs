//! Store handle trait definition

use std::time::Duration;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::item::CacheItem;
use crate::domain::DomainError;

/// Handle to one database of the backing key-value store
///
/// Values are JSON strings so the trait stays dyn-compatible. Encoding is
/// done by the facade's serializer settings before a value reaches the store.
/// Key derivation never touches this trait, it is what concrete caches write
/// derived items to.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a raw JSON value
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw JSON value with a TTL
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Deletes a value, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Checks if a key exists
    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Updates the TTL of an existing key
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Gets the remaining TTL of a key
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError>;
}

/// Extension trait over store handles
pub trait CacheExt: Cache {
    /// Writes a derived item as-is
    fn set_item<'a>(
        &'a self,
        item: &'a CacheItem,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send {
        async move { self.set_raw(&item.key, &item.value, ttl).await }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}

//! Typed cache built by composing a facade

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::domain::cache::{CacheExt, CacheFacade};
use crate::domain::DomainError;

/// Cache of one entity type over a shared facade
///
/// Writes use the facade's default expiration unless a TTL is given.
#[derive(Debug)]
pub struct EntityCache<T> {
    facade: Arc<CacheFacade>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityCache<T> {
    fn clone(&self) -> Self {
        Self {
            facade: Arc::clone(&self.facade),
            _entity: PhantomData,
        }
    }
}

impl<T> EntityCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(facade: Arc<CacheFacade>) -> Self {
        Self {
            facade,
            _entity: PhantomData,
        }
    }

    pub fn facade(&self) -> &CacheFacade {
        &self.facade
    }

    /// Stores an entity under its derived key, returning the key
    pub async fn store(&self, entity: &T) -> Result<String, DomainError> {
        self.store_with_ttl(entity, self.facade.expiration()).await
    }

    pub async fn store_with_ttl(&self, entity: &T, ttl: Duration) -> Result<String, DomainError> {
        let item = self.facade.key_value_pair(entity)?;
        self.facade.database().set_item(&item, ttl).await?;

        debug!(
            key = %item.key,
            ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            "Stored cache item"
        );
        Ok(item.key)
    }

    /// Fetches the entity stored under `id`
    pub async fn fetch(&self, id: &str) -> Result<Option<T>, DomainError> {
        let key = self.facade.item_key::<T>(id);

        match self.facade.database().get_raw(&key).await? {
            Some(data) => Ok(Some(self.facade.deserialize_value(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn contains(&self, id: &str) -> Result<bool, DomainError> {
        self.facade
            .database()
            .exists(&self.facade.item_key::<T>(id))
            .await
    }

    pub async fn remove(&self, id: &str) -> Result<bool, DomainError> {
        self.facade
            .database()
            .delete(&self.facade.item_key::<T>(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde::Deserialize;

    use super::*;
    use crate::config::CacheOptions;
    use crate::domain::cache::{Cache, MockCache, MockStoreConnection, StoreConnection};
    use crate::domain::cacheable::{CacheableDescriptor, DescriptorRegistry};
    use crate::infrastructure::cache::StoreConnections;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        tenant: String,
        id: u64,
        email: Option<String>,
    }

    fn registry() -> Arc<DescriptorRegistry> {
        let registry = DescriptorRegistry::new()
            .with(
                CacheableDescriptor::<User>::new()
                    .store_as("users")
                    .key_display("tenant", |u| u.tenant.as_str())
                    .key_display("id", |u| &u.id),
            )
            .unwrap();

        Arc::new(registry)
    }

    fn user() -> User {
        User {
            tenant: "acme".to_string(),
            id: 7,
            email: Some("a@acme.test".to_string()),
        }
    }

    fn in_memory_cache() -> EntityCache<User> {
        let facade = CacheFacade::with_options(
            &StoreConnections::in_memory(),
            registry(),
            CacheOptions::new().with_domain("app"),
        )
        .unwrap();

        EntityCache::new(Arc::new(facade))
    }

    #[tokio::test]
    async fn test_store_and_fetch() {
        let cache = in_memory_cache();

        let key = cache.store(&user()).await.unwrap();
        assert_eq!(key, "app:users:acme7");

        assert!(cache.contains("acme7").await.unwrap());
        assert_eq!(cache.fetch("acme7").await.unwrap(), Some(user()));
        assert_eq!(cache.fetch("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_uses_default_expiration() {
        let cache = in_memory_cache();
        cache.store(&user()).await.unwrap();

        let ttl = cache
            .facade()
            .database()
            .ttl("app:users:acme7")
            .await
            .unwrap()
            .unwrap();
        assert!(ttl <= Duration::from_secs(5));
        assert!(ttl > Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_store_with_unbounded_ttl() {
        let cache = in_memory_cache();

        cache.store_with_ttl(&user(), Duration::MAX).await.unwrap();
        assert_eq!(cache.fetch("acme7").await.unwrap(), Some(user()));
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = in_memory_cache();
        cache.store(&user()).await.unwrap();

        assert!(cache.remove("acme7").await.unwrap());
        assert!(!cache.remove("acme7").await.unwrap());
        assert!(cache.fetch("acme7").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_writes_derived_pair() {
        let expected = CacheFacade::with_options(
            &StoreConnections::in_memory(),
            registry(),
            CacheOptions::default(),
        )
        .unwrap()
        .key_value_pair(&user())
        .unwrap();

        let mut store = MockCache::new();
        store
            .expect_set_raw()
            .with(
                eq(expected.key.clone()),
                eq(expected.value.clone()),
                eq(Duration::from_secs(30)),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));
        let store: Arc<dyn Cache> = Arc::new(store);

        let mut connection = MockStoreConnection::new();
        connection
            .expect_database()
            .returning(move |_| Some(Arc::clone(&store)));
        let provider =
            StoreConnections::with_connection(Arc::new(connection) as Arc<dyn StoreConnection>);

        let facade = CacheFacade::new(&provider, registry()).unwrap();
        let cache = EntityCache::<User>::new(Arc::new(facade));

        let key = cache
            .store_with_ttl(&user(), Duration::from_secs(30))
            .await
            .unwrap();
        assert_eq!(key, "users:acme7");
    }

    #[tokio::test]
    async fn test_store_propagates_store_errors() {
        let mut store = MockCache::new();
        store
            .expect_set_raw()
            .returning(|_, _, _| Err(DomainError::cache("connection reset")));
        let store: Arc<dyn Cache> = Arc::new(store);

        let mut connection = MockStoreConnection::new();
        connection
            .expect_database()
            .returning(move |_| Some(Arc::clone(&store)));
        let provider = StoreConnections::with_connection(Arc::new(connection));

        let facade = CacheFacade::new(&provider, registry()).unwrap();
        let cache = EntityCache::<User>::new(Arc::new(facade));

        let result = cache.store(&user()).await;
        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }
}

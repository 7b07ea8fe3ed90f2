//! Cache facade binding store configuration to key/value derivation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::item::CacheItem;
use super::key::{normalize_domain, KeyBuilder};
use super::repository::Cache;
use super::serializer::SerializerSettings;
use super::store::ConnectionProvider;
use crate::config::CacheOptions;
use crate::domain::cacheable::{DescriptorRegistry, MetadataResolver};
use crate::domain::DomainError;

/// Shared base for concrete caches
///
/// Holds the store handle and the immutable cache configuration, and derives
/// keys and serialized values for cacheable types. It performs no store I/O;
/// concrete caches compose a facade and write the derived items with
/// whatever store semantics they need.
///
/// ```
/// use std::sync::Arc;
///
/// use keyed_cache::config::CacheOptions;
/// use keyed_cache::domain::cache::CacheFacade;
/// use keyed_cache::domain::cacheable::{CacheableDescriptor, DescriptorRegistry};
/// use keyed_cache::infrastructure::cache::StoreConnections;
///
/// #[derive(serde::Serialize)]
/// struct Order {
///     id: u32,
/// }
///
/// let registry = DescriptorRegistry::new()
///     .with(CacheableDescriptor::<Order>::new().key_display("id", |o| &o.id))
///     .unwrap();
///
/// let facade = CacheFacade::with_options(
///     &StoreConnections::in_memory(),
///     Arc::new(registry),
///     CacheOptions::new().with_domain("Shop"),
/// )
/// .unwrap();
///
/// assert_eq!(facade.item_key_of(&Order { id: 42 }).unwrap(), "Shop:Order:42");
/// assert_eq!(facade.item_key::<Order>("7"), "Shop:Order:7");
/// ```
#[derive(Clone)]
pub struct CacheFacade {
    database: Arc<dyn Cache>,
    keys: KeyBuilder,
    options: CacheOptions,
}

impl CacheFacade {
    /// Creates a facade with the default options
    pub fn new(
        provider: &dyn ConnectionProvider,
        registry: Arc<DescriptorRegistry>,
    ) -> Result<Self, DomainError> {
        Self::with_options(provider, registry, CacheOptions::default())
    }

    /// Creates a facade bound to the configured database
    ///
    /// Fails with [`DomainError::StoreUnavailable`] when the provider has no
    /// connection or the connection has no handle for the database index.
    pub fn with_options(
        provider: &dyn ConnectionProvider,
        registry: Arc<DescriptorRegistry>,
        options: CacheOptions,
    ) -> Result<Self, DomainError> {
        let connection = provider.connection().ok_or_else(DomainError::no_store)?;
        let database = connection
            .database(options.database)
            .ok_or_else(DomainError::no_store)?;

        debug!(
            domain = options.domain.as_deref().unwrap_or_default(),
            database = options.database,
            expiration_ms = options.expiration_ms,
            "Cache facade bound to store"
        );

        Ok(Self {
            database,
            keys: KeyBuilder::new(MetadataResolver::new(registry)),
            options,
        })
    }

    /// Key of `T` for the given identifier
    pub fn item_key<T: 'static>(&self, id: &str) -> String {
        self.keys.compose_for_type::<T>(self.domain(), id)
    }

    /// Key of an instance, from its registered key contributors
    pub fn item_key_of<T: 'static>(&self, item: &T) -> Result<String, DomainError> {
        self.keys.compose_for_instance(self.domain(), item)
    }

    /// Serialized value of an instance paired with its key
    pub fn key_value_pair<T>(&self, item: &T) -> Result<CacheItem, DomainError>
    where
        T: Serialize + 'static,
    {
        let value = self.options.serializer.serialize(item)?;
        let key = self.item_key_of(item)?;

        Ok(CacheItem::new(key, value))
    }

    /// Reads back a value written by [`key_value_pair`](Self::key_value_pair)
    pub fn deserialize_value<T: DeserializeOwned>(&self, value: &str) -> Result<T, DomainError> {
        self.options.serializer.deserialize(value)
    }

    /// Key prefix shared by every instance of `T`
    pub fn key_prefix<T: 'static>(&self) -> String {
        self.keys.key_prefix::<T>(self.domain())
    }

    /// Configured domain, `None` when blank
    pub fn domain(&self) -> Option<&str> {
        normalize_domain(self.options.domain.as_deref())
    }

    /// Default item TTL; not applied by the facade itself
    pub fn expiration(&self) -> Duration {
        self.options.expiration()
    }

    pub fn serializer_settings(&self) -> &SerializerSettings {
        &self.options.serializer
    }

    pub fn database_index(&self) -> i64 {
        self.options.database
    }

    /// Store handle for concrete cache operations
    pub fn database(&self) -> &Arc<dyn Cache> {
        &self.database
    }

    pub fn resolver(&self) -> &MetadataResolver {
        self.keys.resolver()
    }
}

impl fmt::Debug for CacheFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheFacade")
            .field("options", &self.options)
            .field("database", &"<Cache>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    use super::*;
    use crate::domain::cache::serializer::NullValueHandling;
    use crate::domain::cache::store::{MockConnectionProvider, MockStoreConnection};
    use crate::domain::cache::MockCache;
    use crate::domain::cacheable::CacheableDescriptor;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: String,
        customer: Option<String>,
        placed_at: DateTime<Utc>,
        total: f64,
    }

    #[derive(Debug, Serialize)]
    struct Line {
        sku: String,
        position: u32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Delivery {
        Pending(Option<String>),
        Delivered { signed_by: Option<String> },
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Shipment {
        id: u32,
        delivery: Delivery,
        checkpoints: BTreeMap<String, Option<String>>,
    }

    #[derive(Debug, Serialize)]
    struct Unkeyed {
        name: String,
    }

    fn order(id: &str) -> Order {
        Order {
            id: id.to_string(),
            customer: None,
            placed_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            total: 1234.5,
        }
    }

    fn registry() -> Arc<DescriptorRegistry> {
        let registry = DescriptorRegistry::new()
            .with(CacheableDescriptor::<Order>::new().key_display("id", |o| o.id.as_str()))
            .unwrap()
            .with(
                CacheableDescriptor::<Line>::new()
                    .store_as("Lines")
                    .key_display("sku", |l| l.sku.as_str())
                    .key_display("position", |l| &l.position),
            )
            .unwrap()
            .with(CacheableDescriptor::<Shipment>::new().key_display("id", |s| &s.id))
            .unwrap();

        Arc::new(registry)
    }

    fn provider_for(indexes: &'static [i64]) -> MockConnectionProvider {
        let mut provider = MockConnectionProvider::new();
        provider.expect_connection().returning(move || {
            let mut connection = MockStoreConnection::new();
            connection.expect_database().returning(move |index| {
                if indexes.contains(&index) {
                    Some(Arc::new(MockCache::new()) as Arc<dyn Cache>)
                } else {
                    None
                }
            });
            Some(Arc::new(connection) as Arc<dyn crate::domain::cache::StoreConnection>)
        });
        provider
    }

    fn facade(options: CacheOptions) -> CacheFacade {
        CacheFacade::with_options(&provider_for(&[0, 1]), registry(), options).unwrap()
    }

    #[test]
    fn test_item_key_without_domain() {
        let facade = facade(CacheOptions::default());
        assert_eq!(facade.item_key_of(&order("42")).unwrap(), "Order:42");
        assert_eq!(facade.item_key::<Order>("42"), "Order:42");
    }

    #[test]
    fn test_item_key_with_domain() {
        let facade = facade(CacheOptions::new().with_domain("Shop"));
        assert_eq!(facade.item_key_of(&order("42")).unwrap(), "Shop:Order:42");
        assert_eq!(facade.key_prefix::<Order>(), "Shop:Order");
    }

    #[test]
    fn test_blank_domain_is_absent() {
        for domain in ["", "   "] {
            let facade = facade(CacheOptions::new().with_domain(domain));
            assert_eq!(facade.domain(), None);
            assert_eq!(facade.item_key::<Order>("1"), "Order:1");
        }
    }

    #[test]
    fn test_item_key_uses_collection_override_and_concatenates() {
        let facade = facade(CacheOptions::default());
        let line = Line {
            sku: "A".to_string(),
            position: 7,
        };

        assert_eq!(facade.item_key_of(&line).unwrap(), "Lines:A7");
        assert_eq!(facade.item_key::<Line>("B2"), "Lines:B2");
    }

    #[test]
    fn test_item_key_for_unregistered_type() {
        let facade = facade(CacheOptions::default());
        assert_eq!(facade.item_key::<Unkeyed>("x"), "Unkeyed:x");

        let unkeyed = Unkeyed {
            name: "n".to_string(),
        };
        assert!(facade.item_key_of(&unkeyed).unwrap_err().is_configuration());
        assert!(facade.key_value_pair(&unkeyed).unwrap_err().is_configuration());
    }

    #[test]
    fn test_key_value_pair_blank_key_fails() {
        let facade = facade(CacheOptions::default());
        let result = facade.key_value_pair(&order(" "));
        assert!(result.unwrap_err().is_configuration());
    }

    #[test]
    fn test_key_value_pair_round_trip() {
        let facade = facade(CacheOptions::new().with_domain("Shop"));
        let original = order("42");

        let item = facade.key_value_pair(&original).unwrap();
        assert_eq!(item.key, "Shop:Order:42");
        assert!(!item.value.contains("customer"));

        let back: Order = facade.deserialize_value(&item.value).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_key_value_pair_round_trip_keeps_enum_and_map_nulls() {
        let facade = facade(CacheOptions::default());
        let mut checkpoints = BTreeMap::new();
        checkpoints.insert("hub".to_string(), None);

        for delivery in [
            Delivery::Pending(None),
            Delivery::Delivered { signed_by: None },
        ] {
            let shipment = Shipment {
                id: 3,
                delivery,
                checkpoints: checkpoints.clone(),
            };

            let item = facade.key_value_pair(&shipment).unwrap();
            assert_eq!(item.key, "Shipment:3");

            let back: Shipment = facade.deserialize_value(&item.value).unwrap();
            assert_eq!(back, shipment);
        }
    }

    #[test]
    fn test_key_value_pair_honours_null_handling() {
        let serializer =
            SerializerSettings::new().with_null_value_handling(NullValueHandling::Include);
        let facade = facade(CacheOptions::new().with_serializer(serializer));

        let item = facade.key_value_pair(&order("1")).unwrap();
        assert!(item.value.contains(r#""customer":null"#));
    }

    #[test]
    fn test_exposes_configuration() {
        let facade = facade(
            CacheOptions::new()
                .with_domain("Shop")
                .with_database(1)
                .with_expiration(Duration::from_millis(250)),
        );

        assert_eq!(facade.domain(), Some("Shop"));
        assert_eq!(facade.database_index(), 1);
        assert_eq!(facade.expiration(), Duration::from_millis(250));
        assert_eq!(facade.serializer_settings(), &SerializerSettings::default());
    }

    #[test]
    fn test_new_uses_default_options() {
        let facade = CacheFacade::new(&provider_for(&[0]), registry()).unwrap();
        assert_eq!(facade.database_index(), 0);
        assert_eq!(facade.expiration(), Duration::from_secs(5));
    }

    #[test]
    fn test_no_connection_is_store_unavailable() {
        let mut provider = MockConnectionProvider::new();
        provider.expect_connection().returning(|| None);

        let result = CacheFacade::new(&provider, registry());
        assert!(result.unwrap_err().is_store_unavailable());
    }

    #[test]
    fn test_no_database_is_store_unavailable() {
        let result = CacheFacade::with_options(
            &provider_for(&[0]),
            registry(),
            CacheOptions::new().with_database(5),
        );
        assert!(result.unwrap_err().is_store_unavailable());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_facade_is_send_sync() {
        assert_send_sync::<CacheFacade>();
    }
}

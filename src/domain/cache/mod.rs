//! Cache domain - Key derivation, serialization and the store handle contract

mod facade;
mod item;
mod key;
mod repository;
mod serializer;
mod store;
mod value_tree;

pub use facade::CacheFacade;
pub use item::CacheItem;
pub use key::{normalize_domain, KeyBuilder, KEY_SEPARATOR};
pub use repository::{Cache, CacheExt};
pub use serializer::{Culture, NullValueHandling, SerializerSettings};
pub use store::{ConnectionProvider, StoreConnection};

#[cfg(test)]
pub use repository::MockCache;
#[cfg(test)]
pub use store::{MockConnectionProvider, MockStoreConnection};

//! Domain layer - Cacheable metadata, key derivation and store contracts

pub mod cache;
pub mod cacheable;
pub mod error;

pub use cache::{
    CacheFacade, CacheItem, ConnectionProvider, KeyBuilder, SerializerSettings, StoreConnection,
    KEY_SEPARATOR,
};
pub use cacheable::{CacheableDescriptor, DescriptorRegistry, MetadataResolver};
pub use error::DomainError;

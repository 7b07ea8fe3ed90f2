//! Keyed cache
//!
//! Metadata-driven key construction and value serialization in front of a
//! key-value store:
//! - Cacheable types register a collection name and ordered key contributors
//! - Keys are derived as `[domain:]collection:id`
//! - Values are serialized to JSON under configurable settings
//! - Concrete caches compose a `CacheFacade` and write the derived pairs

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, CacheOptions};
pub use domain::{
    CacheFacade, CacheItem, CacheableDescriptor, DescriptorRegistry, DomainError, KeyBuilder,
    MetadataResolver, KEY_SEPARATOR,
};
pub use infrastructure::cache::{EntityCache, StoreConnections};

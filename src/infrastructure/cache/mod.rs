//! Cache infrastructure - Store connections and concrete caches

mod connections;
mod entity_cache;
mod in_memory;
mod redis;

pub use connections::StoreConnections;
pub use entity_cache::EntityCache;
pub use in_memory::{InMemoryCache, InMemoryCacheConfig, InMemoryConnection, DEFAULT_DATABASE_COUNT};
pub use redis::{RedisCache, RedisConnection};

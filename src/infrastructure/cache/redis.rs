//! Redis store implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::cache::{Cache, StoreConnection};
use crate::domain::DomainError;

/// Handle to one Redis database
///
/// The underlying `ConnectionManager` is created on first use and then
/// shared by every clone of the handle, so building a handle performs no I/O.
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    database: i64,
    connection: Arc<OnceCell<ConnectionManager>>,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("database", &self.database)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    /// Creates a handle for the database selected by the client's URL
    pub fn new(client: Client) -> Self {
        let database = client.get_connection_info().redis.db;

        Self {
            client,
            database,
            connection: Arc::new(OnceCell::new()),
        }
    }

    pub fn database(&self) -> i64 {
        self.database
    }

    async fn connection(&self) -> Result<ConnectionManager, DomainError> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                debug!(database = self.database, "Connecting to Redis");
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))
            })
            .await?;

        Ok(manager.clone())
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection().await?;

        let result: Option<String> = conn.get(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;

        // PSETEX keeps sub-second expirations
        let _: () = redis::cmd("PSETEX")
            .arg(key)
            .arg(ttl_millis(ttl))
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection().await?;

        let deleted: i32 = conn.del(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection().await?;

        let exists: bool = conn.exists(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to check existence of key '{}': {}", key, e))
        })?;

        Ok(exists)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.connection().await?;

        let updated: bool = conn.pexpire(key, ttl_millis(ttl)).await.map_err(|e| {
            DomainError::cache(format!("Failed to update TTL for key '{}': {}", key, e))
        })?;

        Ok(updated)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        let mut conn = self.connection().await?;

        let remaining: i64 = conn.pttl(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get TTL for key '{}': {}", key, e))
        })?;

        // Redis returns -2 if key doesn't exist, -1 if no TTL
        if remaining < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_millis(remaining as u64)))
        }
    }
}

/// Millisecond TTL argument, at least 1 and capped at `i64::MAX`
fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX).max(1)
}

/// Connection to a Redis server, handing out one handle per database index
#[derive(Clone)]
pub struct RedisConnection {
    client: Client,
}

impl fmt::Debug for RedisConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConnection")
            .field("addr", &self.client.get_connection_info().addr.to_string())
            .finish()
    }
}

impl RedisConnection {
    /// Parses the connection URL (e.g., "redis://127.0.0.1:6379"); no I/O
    pub fn open(url: &str) -> Result<Self, DomainError> {
        let client = Client::open(url).map_err(|e| {
            DomainError::configuration(format!("Invalid Redis URL '{}': {}", url, e))
        })?;

        Ok(Self { client })
    }
}

impl StoreConnection for RedisConnection {
    fn database(&self, index: i64) -> Option<Arc<dyn Cache>> {
        if index < 0 {
            return None;
        }

        let mut info = self.client.get_connection_info().clone();
        info.redis.db = index;

        let client = Client::open(info).ok()?;
        Some(Arc::new(RedisCache::new(client)))
    }
}

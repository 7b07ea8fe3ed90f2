//! Connection provider wiring for runtime store selection

use std::fmt;
use std::sync::Arc;

use tracing::info;

use super::in_memory::InMemoryConnection;
use super::redis::RedisConnection;
use crate::config::{StoreBackend, StoreConfig};
use crate::domain::cache::{ConnectionProvider, StoreConnection};
use crate::domain::DomainError;

/// Holds the process-wide store connection handed to cache facades
#[derive(Clone, Default)]
pub struct StoreConnections {
    connection: Option<Arc<dyn StoreConnection>>,
}

impl fmt::Debug for StoreConnections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConnections")
            .field("registered", &self.connection.is_some())
            .finish()
    }
}

impl StoreConnections {
    /// Provider with no registered connection
    pub fn empty() -> Self {
        Self::default()
    }

    /// Provider backed by in-memory databases
    pub fn in_memory() -> Self {
        Self::with_connection(Arc::new(InMemoryConnection::new()))
    }

    /// Provider backed by a Redis server; the URL is validated, not dialled
    pub fn redis(url: &str) -> Result<Self, DomainError> {
        let connection = RedisConnection::open(url)?;
        info!(?connection, "Registered Redis store connection");

        Ok(Self::with_connection(Arc::new(connection)))
    }

    pub fn with_connection(connection: Arc<dyn StoreConnection>) -> Self {
        Self {
            connection: Some(connection),
        }
    }

    /// Builds the provider selected by configuration
    pub fn from_config(config: &StoreConfig) -> Result<Self, DomainError> {
        match config.backend {
            StoreBackend::InMemory => Ok(Self::in_memory()),
            StoreBackend::Redis => {
                let url = config.url.as_deref().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for Redis store backend")
                })?;
                Self::redis(url)
            }
        }
    }

    pub fn is_registered(&self) -> bool {
        self.connection.is_some()
    }
}

impl ConnectionProvider for StoreConnections {
    fn connection(&self) -> Option<Arc<dyn StoreConnection>> {
        self.connection.clone()
    }
}

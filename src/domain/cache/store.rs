//! Connection-provider capability consumed by the facade

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use super::repository::Cache;

/// A live connection to the backing store, able to hand out database handles
#[cfg_attr(test, automock)]
pub trait StoreConnection: Send + Sync {
    /// Handle for the numbered database, `None` when it is not usable
    fn database(&self, index: i64) -> Option<Arc<dyn Cache>>;
}

/// Capability yielding the shared store connection, if one is configured
#[cfg_attr(test, automock)]
pub trait ConnectionProvider: Send + Sync {
    fn connection(&self) -> Option<Arc<dyn StoreConnection>>;
}

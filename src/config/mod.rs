//! Configuration - Cache options and layered application settings

mod app_config;
mod cache_options;

pub use app_config::{AppConfig, LogFormat, LoggingConfig, StoreBackend, StoreConfig};
pub use cache_options::{CacheOptions, DEFAULT_DATABASE, DEFAULT_EXPIRATION_MS};

//! Infrastructure layer - Store adapters and process plumbing

pub mod cache;
pub mod logging;

pub use logging::init_logging;

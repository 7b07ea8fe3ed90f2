//! Cacheable domain - Static metadata declaring how types are keyed

mod descriptor;
mod registry;
mod resolver;

pub use descriptor::{identity_name, CacheableDescriptor, KeyAccessor, KeyContributor};
pub use registry::DescriptorRegistry;
pub use resolver::MetadataResolver;

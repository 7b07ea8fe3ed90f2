//! Resolution of collection names and key values from registered metadata

use std::sync::Arc;

use super::descriptor::identity_name;
use super::registry::DescriptorRegistry;
use crate::domain::DomainError;

/// Resolves collection names and instance keys against a descriptor registry
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    registry: Arc<DescriptorRegistry>,
}

impl MetadataResolver {
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    /// Collection name of `T`: its non-blank override, else its type name
    pub fn collection_name<T: 'static>(&self) -> String {
        match self.registry.get::<T>() {
            Some(descriptor) => descriptor.collection_name().to_string(),
            None => identity_name::<T>().to_string(),
        }
    }

    /// Collection name of the instance's type
    pub fn collection_name_of<T: 'static>(&self, _item: &T) -> String {
        self.collection_name::<T>()
    }

    /// Concatenates every key contributor's value in declared order
    ///
    /// Values are joined without a separator; unset contributors are skipped.
    /// Fails when the result is empty or whitespace-only, which includes
    /// types with no contributors and types that were never registered.
    pub fn key_value<T: 'static>(&self, item: &T) -> Result<String, DomainError> {
        let key: String = self
            .registry
            .get::<T>()
            .map(|descriptor| {
                descriptor
                    .contributors()
                    .iter()
                    .filter_map(|contributor| contributor.value(item))
                    .collect()
            })
            .unwrap_or_default();

        if key.trim().is_empty() {
            return Err(DomainError::empty_key());
        }

        Ok(key)
    }
}

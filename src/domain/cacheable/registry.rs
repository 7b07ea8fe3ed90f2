//! Capability table of cacheable type descriptors

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use super::descriptor::CacheableDescriptor;
use crate::domain::DomainError;

type ErasedDescriptor = Box<dyn Any + Send + Sync>;

/// Registry mapping each cacheable type to its descriptor
///
/// Types are registered once at startup; the registry is then shared
/// read-only (typically behind an `Arc`) by resolvers and facades.
#[derive(Default)]
pub struct DescriptorRegistry {
    descriptors: HashMap<TypeId, ErasedDescriptor>,
    names: HashMap<TypeId, &'static str>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the descriptor for `T`
    ///
    /// Fails if `T` already has a descriptor, so a type's collection name
    /// cannot change after the first registration.
    pub fn register<T: 'static>(
        &mut self,
        descriptor: CacheableDescriptor<T>,
    ) -> Result<&mut Self, DomainError> {
        let type_id = TypeId::of::<T>();

        if self.descriptors.contains_key(&type_id) {
            return Err(DomainError::configuration(format!(
                "Type '{}' is already registered as cacheable",
                descriptor.type_name()
            )));
        }

        self.names.insert(type_id, descriptor.type_name());
        self.descriptors.insert(type_id, Box::new(descriptor));
        Ok(self)
    }

    /// Builder-style registration
    pub fn with<T: 'static>(mut self, descriptor: CacheableDescriptor<T>) -> Result<Self, DomainError> {
        self.register(descriptor)?;
        Ok(self)
    }

    /// Looks up the descriptor registered for `T`
    pub fn get<T: 'static>(&self) -> Option<&CacheableDescriptor<T>> {
        self.descriptors
            .get(&TypeId::of::<T>())
            .and_then(|d| d.downcast_ref::<CacheableDescriptor<T>>())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.descriptors.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl fmt::Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names.values().collect();
        names.sort();

        f.debug_struct("DescriptorRegistry")
            .field("types", &names)
            .finish()
    }
}

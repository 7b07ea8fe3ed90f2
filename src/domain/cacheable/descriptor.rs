//! Cacheable type descriptors
//!
//! A descriptor is the static metadata of a cacheable type: the name of the
//! collection its instances are grouped under and the ordered list of fields
//! that contribute to an instance's key.

use std::fmt::{self, Debug, Display};

/// Accessor returning the string form of a key contributor, `None` when unset
pub type KeyAccessor<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// A field of a cacheable type that participates in key derivation
pub struct KeyContributor<T> {
    name: &'static str,
    accessor: KeyAccessor<T>,
}

impl<T> KeyContributor<T> {
    pub fn new<F>(name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name,
            accessor: Box::new(accessor),
        }
    }

    /// Field name, used for diagnostics only
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the contributor's value from an instance
    pub fn value(&self, item: &T) -> Option<String> {
        (self.accessor)(item)
    }
}

impl<T> Debug for KeyContributor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyContributor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Metadata declaring `T` as cacheable
///
/// ```
/// use keyed_cache::domain::cacheable::CacheableDescriptor;
///
/// struct Order {
///     region: String,
///     number: u32,
/// }
///
/// let descriptor = CacheableDescriptor::<Order>::new()
///     .store_as("orders")
///     .key_display("region", |o| &o.region)
///     .key_display("number", |o| &o.number);
///
/// assert_eq!(descriptor.type_name(), "Order");
/// assert_eq!(descriptor.contributors().len(), 2);
/// ```
pub struct CacheableDescriptor<T> {
    type_name: &'static str,
    store_as: Option<String>,
    contributors: Vec<KeyContributor<T>>,
}

impl<T: 'static> CacheableDescriptor<T> {
    /// Creates a descriptor with no override and no key contributors
    pub fn new() -> Self {
        Self {
            type_name: identity_name::<T>(),
            store_as: None,
            contributors: Vec::new(),
        }
    }

    /// Sets the collection name used instead of the type name
    pub fn store_as(mut self, collection: impl Into<String>) -> Self {
        self.store_as = Some(collection.into());
        self
    }

    /// Appends a key contributor; contributors are evaluated in the order added
    pub fn key<F>(mut self, name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        self.contributors.push(KeyContributor::new(name, accessor));
        self
    }

    /// Appends a key contributor for an always-present field
    pub fn key_display<V, F>(self, name: &'static str, accessor: F) -> Self
    where
        V: Display + ?Sized + 'static,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        self.key(name, move |item| Some(accessor(item).to_string()))
    }
}

impl<T: 'static> Default for CacheableDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheableDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn store_as_override(&self) -> Option<&str> {
        self.store_as.as_deref()
    }

    pub fn contributors(&self) -> &[KeyContributor<T>] {
        &self.contributors
    }

    /// The override when it is non-blank, the type name otherwise
    pub fn collection_name(&self) -> &str {
        match self.store_as.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.type_name,
        }
    }
}

impl<T> Debug for CacheableDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheableDescriptor")
            .field("type_name", &self.type_name)
            .field("store_as", &self.store_as)
            .field("contributors", &self.contributors)
            .finish()
    }
}

/// Short identity name of a type: last path segment, generic arguments removed
pub fn identity_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

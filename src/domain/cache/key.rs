//! Hierarchical cache key composition

use crate::domain::cacheable::MetadataResolver;
use crate::domain::DomainError;

/// Delimiter between the domain, collection and identifier segments
pub const KEY_SEPARATOR: char = ':';

/// Treats `None`, `""` and whitespace-only domains alike
pub fn normalize_domain(domain: Option<&str>) -> Option<&str> {
    domain.filter(|d| !d.trim().is_empty())
}

/// Composes `[domain:]collection:id` keys
///
/// The identifier is not escaped: an id containing [`KEY_SEPARATOR`] yields
/// a key that cannot be split back into its segments unambiguously.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    resolver: MetadataResolver,
}

impl KeyBuilder {
    pub fn new(resolver: MetadataResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Joins the segments; a blank domain is left out
    pub fn compose(domain: Option<&str>, collection: &str, id: &str) -> String {
        format!("{}{}{}", Self::prefix(domain, collection), KEY_SEPARATOR, id)
    }

    /// `[domain:]collection` without a trailing separator
    pub fn prefix(domain: Option<&str>, collection: &str) -> String {
        match normalize_domain(domain) {
            Some(domain) => format!("{}{}{}", domain, KEY_SEPARATOR, collection),
            None => collection.to_string(),
        }
    }

    /// Key prefix shared by every instance of `T`
    pub fn key_prefix<T: 'static>(&self, domain: Option<&str>) -> String {
        Self::prefix(domain, &self.resolver.collection_name::<T>())
    }

    /// Key of `T` for an externally supplied identifier
    pub fn compose_for_type<T: 'static>(&self, domain: Option<&str>, id: &str) -> String {
        format!("{}{}{}", self.key_prefix::<T>(domain), KEY_SEPARATOR, id)
    }

    /// Key of an instance, resolved from its registered metadata
    pub fn compose_for_instance<T: 'static>(
        &self,
        domain: Option<&str>,
        item: &T,
    ) -> Result<String, DomainError> {
        let collection = self.resolver.collection_name_of(item);
        let id = self.resolver.key_value(item)?;

        Ok(Self::compose(domain, &collection, &id))
    }
}

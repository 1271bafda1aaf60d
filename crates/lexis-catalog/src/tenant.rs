//! Tenant-bound view of a [`Resolver`]

use crate::error::CatalogResult;
use crate::format::FormatArg;
use crate::resolver::{Resolved, Resolver};
use std::collections::HashMap;

/// A [`Resolver`] with the tenant argument filled in.
///
/// ```
/// use lexis_catalog::{CatalogStore, MemorySource, Resolver};
/// use std::sync::Arc;
///
/// let store = Arc::new(CatalogStore::new());
/// store.load("shop", "EN", MemorySource::new().with("EN", r#"{"title":"Shop"}"#));
///
/// let resolver = Resolver::new(store);
/// let shop = resolver.tenant("shop");
/// assert_eq!(shop.get_string("title"), "Shop");
/// assert_eq!(shop.get_string("missing"), "[missing]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TenantHandle<'a> {
    resolver: &'a Resolver,
    tenant: &'a str,
}

impl<'a> TenantHandle<'a> {
    pub(crate) const fn new(resolver: &'a Resolver, tenant: &'a str) -> Self {
        Self { resolver, tenant }
    }

    /// The tenant this handle resolves for
    #[must_use]
    pub const fn id(&self) -> &'a str {
        self.tenant
    }

    /// See [`Resolver::get_string`]
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.resolver.get_string(self.tenant, key)
    }

    /// See [`Resolver::get_string_formatted`]
    #[must_use]
    pub fn get_string_formatted(&self, key: &str, args: &[FormatArg]) -> String {
        self.resolver.get_string_formatted(self.tenant, key, args)
    }

    /// See [`Resolver::get_string_array`]
    #[must_use]
    pub fn get_string_array(&self, key: &str) -> Vec<String> {
        self.resolver.get_string_array(self.tenant, key)
    }

    /// See [`Resolver::get_string_dictionary`]
    #[must_use]
    pub fn get_string_dictionary(&self, key: &str) -> HashMap<String, String> {
        self.resolver.get_string_dictionary(self.tenant, key)
    }

    /// See [`Resolver::get_dictionary_entry`]
    pub fn get_dictionary_entry(&self, dictionary_key: &str, entry_key: &str) -> CatalogResult<String> {
        self.resolver
            .get_dictionary_entry(self.tenant, dictionary_key, entry_key)
    }

    /// See [`Resolver::has_key`]
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.resolver.has_key(self.tenant, key)
    }

    /// See [`Resolver::lookup`]
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Resolved> {
        self.resolver.lookup(self.tenant, key)
    }

    /// See [`Resolver::reload`]
    pub fn reload(&self) -> CatalogResult<()> {
        self.resolver.reload(self.tenant)
    }
}

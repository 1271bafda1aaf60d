//! Tenant-scoped lookups with baseline fallback
//!
//! Every lookup consults the active catalog first and the baseline catalog
//! second, both taken from one snapshot. Lookups are total: a miss in both
//! tiers yields a placeholder or an empty container and is logged. The only
//! exception is [`Resolver::get_dictionary_entry`], which reports a missing
//! entry to the caller.
//!
//! | Outcome | Event |
//! |---------|-------|
//! | active hit | one `info` |
//! | baseline hit | one `warn` |
//! | miss | one `error` |

use crate::error::{CatalogError, CatalogResult};
use crate::format::{format_template, FormatArg};
use crate::locale::LocaleCode;
use crate::path::KeyPath;
use crate::store::{CatalogStore, TenantCatalogs};
use crate::tenant::TenantHandle;
use crate::tree::CatalogTree;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Text returned by [`Resolver::get_string`] when a key resolves nowhere.
#[must_use]
pub fn placeholder(key: &str) -> String {
    format!("[{key}]")
}

/// Which catalog answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// The tenant's active locale
    Active,
    /// The baseline locale
    Baseline,
}

/// Result of [`Resolver::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The resolved node, never `null`
    pub value: CatalogTree,
    /// Catalog it came from
    pub tier: Tier,
    /// Locale of that catalog
    pub locale: LocaleCode,
}

/// Resolves keys against the catalogs held by a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct Resolver {
    store: Arc<CatalogStore>,
}

impl Resolver {
    /// Create a resolver over `store`
    #[must_use]
    pub const fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// A view of this resolver bound to one tenant
    #[must_use]
    pub const fn tenant<'a>(&'a self, tenant: &'a str) -> TenantHandle<'a> {
        TenantHandle::new(self, tenant)
    }

    /// Resolve `key` to text, falling back to the baseline catalog and
    /// finally to `"[key]"`.
    #[must_use]
    pub fn get_string(&self, tenant: &str, key: &str) -> String {
        self.resolve_logged(tenant, key, "string", |node| Some(node.to_display_string()))
            .unwrap_or_else(|| placeholder(key))
    }

    /// Resolve `key` and substitute positional `args` into it.
    ///
    /// A placeholder result is returned as is. If the template is malformed
    /// the failure is logged and the unsubstituted template is returned.
    #[must_use]
    pub fn get_string_formatted(&self, tenant: &str, key: &str, args: &[FormatArg]) -> String {
        let template = self.get_string(tenant, key);
        if template.is_empty() || template == placeholder(key) {
            return template;
        }

        match format_template(&template, args) {
            Ok(formatted) => formatted,
            Err(e) => {
                error!(
                    tenant = %tenant,
                    key = %key,
                    "String formatting failed for key '{}', template {:?}: {}",
                    key,
                    template,
                    e
                );
                template
            }
        }
    }

    /// Resolve `key` to an array and stringify its elements.
    ///
    /// Tiers holding something other than an array are skipped. A miss
    /// yields an empty vector.
    #[must_use]
    pub fn get_string_array(&self, tenant: &str, key: &str) -> Vec<String> {
        self.resolve_logged(tenant, key, "array", |node| {
            node.as_array()
                .map(|items| items.iter().map(CatalogTree::to_display_string).collect())
        })
        .unwrap_or_default()
    }

    /// Resolve `key` to an object and flatten it to string values.
    ///
    /// Non-string values are stringified and `null` members are left out.
    /// Tiers holding something other than an object are skipped. A miss
    /// yields an empty map.
    #[must_use]
    pub fn get_string_dictionary(&self, tenant: &str, key: &str) -> HashMap<String, String> {
        self.resolve_logged(tenant, key, "dictionary", |node| {
            node.as_object().map(|members| {
                members
                    .iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(name, value)| (name.clone(), value.to_display_string()))
                    .collect()
            })
        })
        .unwrap_or_default()
    }

    /// Look up `entry_key` in the dictionary at `dictionary_key`.
    ///
    /// Unlike the other lookups this fails, with
    /// [`CatalogError::KeyNotFound`], when the entry is absent.
    pub fn get_dictionary_entry(
        &self,
        tenant: &str,
        dictionary_key: &str,
        entry_key: &str,
    ) -> CatalogResult<String> {
        self.get_string_dictionary(tenant, dictionary_key)
            .remove(entry_key)
            .ok_or_else(|| CatalogError::KeyNotFound {
                dictionary: dictionary_key.to_string(),
                entry: entry_key.to_string(),
            })
    }

    /// Whether either tier holds a non-null value for `key`. Does not log.
    #[must_use]
    pub fn has_key(&self, tenant: &str, key: &str) -> bool {
        self.store
            .snapshot(tenant)
            .and_then(|catalogs| resolve(&catalogs, key, |_| Some(())))
            .is_some()
    }

    /// Resolve `key` without logging or placeholders, reporting which tier
    /// answered.
    #[must_use]
    pub fn lookup(&self, tenant: &str, key: &str) -> Option<Resolved> {
        let catalogs = self.store.snapshot(tenant)?;
        let (value, tier) = resolve(&catalogs, key, |node| Some(node.clone()))?;
        let locale = match tier {
            Tier::Active => catalogs.active_locale().clone(),
            Tier::Baseline => catalogs.baseline_locale().clone(),
        };
        Some(Resolved {
            value,
            tier,
            locale,
        })
    }

    /// Leaf keys the baseline catalog defines but the active catalog does
    /// not, sorted. Empty when the active locale is the baseline.
    #[must_use]
    pub fn untranslated_keys(&self, tenant: &str) -> Vec<String> {
        let Some(catalogs) = self.store.snapshot(tenant) else {
            return Vec::new();
        };
        if catalogs.active_locale() == catalogs.baseline_locale() {
            return Vec::new();
        }

        let present = |tree: &CatalogTree, key: &str| tree.navigate(key).is_some_and(|n| !n.is_null());
        catalogs
            .baseline()
            .leaf_paths()
            .into_iter()
            .filter(|key| present(catalogs.baseline(), key) && !present(catalogs.active(), key))
            .collect()
    }

    /// Re-read both catalogs of `tenant`.
    pub fn reload(&self, tenant: &str) -> CatalogResult<()> {
        self.store.reload(tenant)
    }

    fn resolve_logged<T, F>(&self, tenant: &str, key: &str, expected: &str, accept: F) -> Option<T>
    where
        F: Fn(&CatalogTree) -> Option<T>,
    {
        let Some(catalogs) = self.store.snapshot(tenant) else {
            error!(
                tenant = %tenant,
                key = %key,
                "Translation key '{}' requested for a tenant with no loaded catalogs",
                key
            );
            return None;
        };

        match resolve(&catalogs, key, accept) {
            Some((value, Tier::Active)) => {
                info!(tenant = %tenant, key = %key, "Resolved {} from {} catalog", expected, catalogs.active_locale());
                Some(value)
            }
            Some((value, Tier::Baseline)) => {
                warn!(
                    tenant = %tenant,
                    key = %key,
                    "Translation key '{}' not found in {} catalog, using {} fallback",
                    key,
                    catalogs.active_locale(),
                    catalogs.baseline_locale()
                );
                Some(value)
            }
            None => {
                error!(
                    tenant = %tenant,
                    key = %key,
                    "Translation key '{}' not found as {} in {} or {} catalog",
                    key,
                    expected,
                    catalogs.active_locale(),
                    catalogs.baseline_locale()
                );
                None
            }
        }
    }
}

fn resolve<T, F>(catalogs: &TenantCatalogs, key: &str, accept: F) -> Option<(T, Tier)>
where
    F: Fn(&CatalogTree) -> Option<T>,
{
    let path = KeyPath::parse(key);
    [
        (Tier::Active, catalogs.active()),
        (Tier::Baseline, catalogs.baseline()),
    ]
    .into_iter()
    .find_map(|(tier, tree)| {
        tree.lookup(key, &path)
            .filter(|node| !node.is_null())
            .and_then(&accept)
            .map(|value| (value, tier))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use lexis_common::test_utils::EventCapture;
    use tracing::Level;

    fn resolver(active: &str, baseline: &str) -> Resolver {
        let store = Arc::new(CatalogStore::new());
        store.load(
            "t",
            "FR",
            MemorySource::new().with("FR", active).with("EN", baseline),
        );
        Resolver::new(store)
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder("menu.open"), "[menu.open]");
    }

    #[test]
    fn test_null_in_active_falls_back() {
        let resolver = resolver(r#"{"k":null}"#, r#"{"k":"base"}"#);
        assert_eq!(resolver.get_string("t", "k"), "base");
    }

    #[test]
    fn test_wrong_type_in_active_falls_back() {
        let resolver = resolver(r#"{"menu":"flat"}"#, r#"{"menu":["a","b"]}"#);
        let capture = EventCapture::new();
        let items = capture.run(|| resolver.get_string_array("t", "menu"));

        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(capture.count(Level::WARN), 1);
    }

    #[test]
    fn test_lookup_reports_tier() {
        let resolver = resolver(r#"{"a":"fr"}"#, r#"{"a":"en","b":"en"}"#);

        let a = resolver.lookup("t", "a").unwrap();
        assert_eq!(a.tier, Tier::Active);
        assert_eq!(a.locale.as_str(), "FR");

        let b = resolver.lookup("t", "b").unwrap();
        assert_eq!(b.tier, Tier::Baseline);
        assert_eq!(b.value, CatalogTree::String("en".to_string()));

        assert!(resolver.lookup("t", "c").is_none());
        assert!(resolver.lookup("other", "a").is_none());
    }

    #[test]
    fn test_lookup_does_not_log() {
        let resolver = resolver("{}", r#"{"b":"en"}"#);
        let capture = EventCapture::new();
        capture.run(|| {
            let _ = resolver.lookup("t", "b");
            let _ = resolver.lookup("t", "missing");
            let _ = resolver.has_key("t", "missing");
        });
        assert!(capture.events().is_empty());
    }

    #[test]
    fn test_bracket_key_without_name_is_a_miss() {
        let resolver = resolver(r#"{"secret":"s","items":[1,2]}"#, "{}");
        let capture = EventCapture::new();
        let value = capture.run(|| resolver.get_string("t", "[x]"));

        assert_eq!(value, "[[x]]");
        assert_eq!(capture.count(Level::ERROR), 1);
        assert!(!resolver.has_key("t", "[x]"));
        assert!(resolver.get_string_dictionary("t", "[x]").is_empty());
        assert!(resolver.get_string_array("t", "items[99999999999999999999]").is_empty());
        assert!(resolver.lookup("t", "items[99999999999999999999]").is_none());
    }

    #[test]
    fn test_unknown_tenant_is_total() {
        let resolver = Resolver::new(Arc::new(CatalogStore::new()));
        let capture = EventCapture::new();
        let value = capture.run(|| resolver.get_string("ghost", "k"));

        assert_eq!(value, "[k]");
        assert_eq!(capture.count(Level::ERROR), 1);
        assert!(!resolver.has_key("ghost", "k"));
        assert!(resolver.get_string_array("ghost", "k").is_empty());
        assert!(resolver.untranslated_keys("ghost").is_empty());
    }

    #[test]
    fn test_untranslated_keys() {
        let resolver = resolver(
            r#"{"menu":{"open":"Ouvrir"},"title":null}"#,
            r#"{"menu":{"open":"Open","close":"Close"},"title":"Title","list":["x"]}"#,
        );
        assert_eq!(
            resolver.untranslated_keys("t"),
            vec!["list[0]", "menu.close", "title"]
        );
    }

    #[test]
    fn test_formatted_empty_template_is_returned() {
        let resolver = resolver(r#"{"blank":""}"#, "{}");
        assert_eq!(resolver.get_string_formatted("t", "blank", &crate::catalog_args!["x"]), "");
    }
}

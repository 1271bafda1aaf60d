//! Per-tenant catalog storage with snapshot publication
//!
//! # Concurrency
//!
//! Each tenant owns an [`ArcSwap`] holding its current [`TenantCatalogs`].
//! Readers load the pointer once and work on that snapshot for the rest of
//! the call, so they never wait on a reload and never see the active tree
//! of one generation paired with the baseline tree of another.
//!
//! Loads and reloads of one tenant are serialized by a per-tenant mutex.
//! Both trees are parsed while holding it and published with one store;
//! other tenants reload in parallel. The tenant table itself is only locked
//! for the instant it takes to find or insert an entry.

use crate::error::{CatalogError, CatalogResult};
use crate::locale::LocaleCode;
use crate::source::CatalogSource;
use crate::tree::CatalogTree;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use lexis_common::TenantId;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The active and baseline catalogs of one tenant, published as a unit.
#[derive(Debug, Clone)]
pub struct TenantCatalogs {
    active_locale: LocaleCode,
    baseline_locale: LocaleCode,
    active: Arc<CatalogTree>,
    baseline: Arc<CatalogTree>,
    generation: u64,
}

impl TenantCatalogs {
    /// A pair of empty catalogs.
    #[must_use]
    pub fn empty(active_locale: LocaleCode, baseline_locale: LocaleCode) -> Self {
        Self {
            active_locale,
            baseline_locale,
            active: Arc::new(CatalogTree::empty()),
            baseline: Arc::new(CatalogTree::empty()),
            generation: 0,
        }
    }

    /// Catalog of the active locale.
    #[must_use]
    pub fn active(&self) -> &CatalogTree {
        &self.active
    }

    /// Catalog of the baseline locale.
    #[must_use]
    pub fn baseline(&self) -> &CatalogTree {
        &self.baseline
    }

    /// Locale of [`active`](Self::active).
    #[must_use]
    pub const fn active_locale(&self) -> &LocaleCode {
        &self.active_locale
    }

    /// Locale of [`baseline`](Self::baseline).
    #[must_use]
    pub const fn baseline_locale(&self) -> &LocaleCode {
        &self.baseline_locale
    }

    /// Number of publications for this tenant; 0 before the first load.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

struct Loader {
    source: Arc<dyn CatalogSource>,
    active_locale: LocaleCode,
}

struct TenantSlot {
    snapshot: ArcSwap<TenantCatalogs>,
    loader: Mutex<Loader>,
}

/// Holds the catalogs of every tenant.
///
/// Create one per host and share it by `Arc`; independent stores do not
/// interact.
pub struct CatalogStore {
    baseline_locale: LocaleCode,
    tenants: DashMap<TenantId, Arc<TenantSlot>>,
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("baseline_locale", &self.baseline_locale)
            .field("tenants", &self.tenants.len())
            .finish()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create a store falling back to `EN`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_baseline(LocaleCode::baseline())
    }

    /// Create a store falling back to `baseline_locale`.
    pub fn with_baseline(baseline_locale: impl Into<LocaleCode>) -> Self {
        Self {
            baseline_locale: baseline_locale.into(),
            tenants: DashMap::new(),
        }
    }

    /// The locale every tenant falls back to.
    #[must_use]
    pub const fn baseline_locale(&self) -> &LocaleCode {
        &self.baseline_locale
    }

    /// Load (or replace) the catalogs of `tenant`.
    ///
    /// Reads the active and baseline catalogs from `source` and publishes
    /// them together. Missing or malformed catalogs degrade to empty ones and
    /// are logged; this never fails. `source` is kept for later reloads.
    pub fn load<S>(&self, tenant: impl Into<TenantId>, active_locale: impl Into<LocaleCode>, source: S)
    where
        S: CatalogSource + 'static,
    {
        let tenant = tenant.into();
        let active_locale = active_locale.into();
        let source: Arc<dyn CatalogSource> = Arc::new(source);

        let slot = self
            .tenants
            .entry(tenant.clone())
            .or_insert_with(|| {
                Arc::new(TenantSlot {
                    snapshot: ArcSwap::from_pointee(TenantCatalogs::empty(
                        active_locale.clone(),
                        self.baseline_locale.clone(),
                    )),
                    loader: Mutex::new(Loader {
                        source: Arc::clone(&source),
                        active_locale: active_locale.clone(),
                    }),
                })
            })
            .value()
            .clone();

        let mut loader = slot.loader.lock();
        loader.source = source;
        loader.active_locale = active_locale;
        self.publish(&tenant, &slot, &loader);
    }

    /// Re-read both catalogs of `tenant` from its source and publish them.
    pub fn reload(&self, tenant: &str) -> CatalogResult<()> {
        let slot = self.slot(tenant)?;
        let loader = slot.loader.lock();
        self.publish(&TenantId::from(tenant), &slot, &loader);
        Ok(())
    }

    /// Change the active locale of `tenant` and reload.
    pub fn switch_locale(&self, tenant: &str, locale: impl Into<LocaleCode>) -> CatalogResult<()> {
        let slot = self.slot(tenant)?;
        let mut loader = slot.loader.lock();
        loader.active_locale = locale.into();
        self.publish(&TenantId::from(tenant), &slot, &loader);
        Ok(())
    }

    /// Current catalogs of `tenant`, if it was ever loaded.
    #[must_use]
    pub fn snapshot(&self, tenant: &str) -> Option<Arc<TenantCatalogs>> {
        self.tenants
            .get(tenant)
            .map(|slot| slot.snapshot.load_full())
    }

    /// Active locale of the current snapshot of `tenant`.
    #[must_use]
    pub fn active_locale(&self, tenant: &str) -> Option<LocaleCode> {
        self.snapshot(tenant).map(|s| s.active_locale().clone())
    }

    /// Whether `tenant` has an entry.
    #[must_use]
    pub fn contains(&self, tenant: &str) -> bool {
        self.tenants.contains_key(tenant)
    }

    /// All tenants with an entry, sorted.
    #[must_use]
    pub fn tenants(&self) -> Vec<TenantId> {
        let mut tenants: Vec<TenantId> = self.tenants.iter().map(|e| e.key().clone()).collect();
        tenants.sort();
        tenants
    }

    /// Forget `tenant`. Snapshots already handed out stay valid.
    pub fn drop_tenant(&self, tenant: &str) -> bool {
        let removed = self.tenants.remove(tenant).is_some();
        if removed {
            info!(tenant = %tenant, "Dropped tenant catalogs");
        }
        removed
    }

    fn slot(&self, tenant: &str) -> CatalogResult<Arc<TenantSlot>> {
        self.tenants
            .get(tenant)
            .map(|slot| Arc::clone(slot.value()))
            .ok_or_else(|| CatalogError::UnknownTenant(tenant.to_string()))
    }

    // Caller holds `slot.loader`.
    fn publish(&self, tenant: &TenantId, slot: &TenantSlot, loader: &Loader) {
        let source = loader.source.as_ref();
        let active = Arc::new(read_catalog(tenant, source, &loader.active_locale));
        let baseline = if loader.active_locale == self.baseline_locale {
            Arc::clone(&active)
        } else {
            Arc::new(read_catalog(tenant, source, &self.baseline_locale))
        };

        let generation = slot.snapshot.load().generation + 1;
        slot.snapshot.store(Arc::new(TenantCatalogs {
            active_locale: loader.active_locale.clone(),
            baseline_locale: self.baseline_locale.clone(),
            active,
            baseline,
            generation,
        }));

        debug!(
            tenant = %tenant,
            generation,
            "Published catalogs (active {}, baseline {})",
            loader.active_locale,
            self.baseline_locale
        );
    }
}

fn read_catalog(tenant: &TenantId, source: &dyn CatalogSource, locale: &LocaleCode) -> CatalogTree {
    let location = source.describe(locale);
    match source.read(locale) {
        Ok(Some(bytes)) => match CatalogTree::parse(&bytes) {
            Ok(tree) => {
                info!(tenant = %tenant, locale = %locale, "Loaded catalog {}", location);
                tree
            }
            Err(e) => {
                error!(tenant = %tenant, locale = %locale, "Failed to parse catalog {}: {}", location, e);
                CatalogTree::empty()
            }
        },
        Ok(None) => {
            warn!(tenant = %tenant, locale = %locale, "Catalog {} not found, using an empty catalog", location);
            CatalogTree::empty()
        }
        Err(e) => {
            error!(tenant = %tenant, locale = %locale, "Failed to read catalog {}: {}", location, e);
            CatalogTree::empty()
        }
    }
}

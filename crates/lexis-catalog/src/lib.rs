//! # Lexis Catalog
//!
//! Tenant-scoped JSON locale catalogs with baseline fallback.
//!
//! Each tenant loads `<LOCALE>.json` for its active locale and for the
//! baseline locale (`EN` unless configured otherwise). Keys are resolved
//! against the active catalog first and the baseline second; a miss in both
//! yields the placeholder `"[key]"` instead of an error.
//!
//! ```
//! use lexis_catalog::{catalog_args, CatalogStore, MemorySource, Resolver};
//! use std::sync::Arc;
//!
//! let source = MemorySource::new()
//!     .with("FR", r#"{"greeting":"Bonjour, {0}!"}"#)
//!     .with("EN", r#"{"greeting":"Hello, {0}!","menu":{"open":"Open"}}"#);
//!
//! let store = Arc::new(CatalogStore::new());
//! store.load("shop", "FR", source);
//! let resolver = Resolver::new(store);
//!
//! assert_eq!(resolver.get_string_formatted("shop", "greeting", &catalog_args!["Ana"]), "Bonjour, Ana!");
//! assert_eq!(resolver.get_string("shop", "menu.open"), "Open");
//! assert_eq!(resolver.get_string("shop", "menu.close"), "[menu.close]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod format;
pub mod locale;
pub mod path;
pub mod resolver;
pub mod source;
pub mod store;
pub mod tenant;
pub mod tree;

pub use error::{CatalogError, CatalogResult, FormatError};
pub use format::{format_template, FormatArg};
pub use lexis_common::TenantId;
pub use locale::{LocaleCode, BASELINE_LOCALE};
pub use path::{KeyPath, Segment};
pub use resolver::{placeholder, Resolved, Resolver, Tier};
pub use source::{CatalogSource, DirectorySource, MemorySource};
pub use store::{CatalogStore, TenantCatalogs};
pub use tenant::TenantHandle;
pub use tree::CatalogTree;

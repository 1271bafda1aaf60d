//! Catalog byte sources
//!
//! The store never opens files itself. A [`CatalogSource`] hands it the raw
//! bytes of `<LOCALE>.json` for one tenant, or reports the file absent.

use crate::locale::LocaleCode;
use lexis_common::is_safe_file_stem;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Supplies raw catalog bytes for one tenant.
pub trait CatalogSource: Send + Sync {
    /// Read the catalog for `locale`.
    ///
    /// Returns `Ok(None)` when the catalog does not exist. Errors are
    /// reserved for catalogs that exist but cannot be read.
    fn read(&self, locale: &LocaleCode) -> io::Result<Option<Vec<u8>>>;

    /// Where the catalog for `locale` lives, for log messages.
    fn describe(&self, locale: &LocaleCode) -> String {
        locale.file_name()
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn read(&self, locale: &LocaleCode) -> io::Result<Option<Vec<u8>>> {
        (**self).read(locale)
    }

    fn describe(&self, locale: &LocaleCode) -> String {
        (**self).describe(locale)
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Box<T> {
    fn read(&self, locale: &LocaleCode) -> io::Result<Option<Vec<u8>>> {
        (**self).read(locale)
    }

    fn describe(&self, locale: &LocaleCode) -> String {
        (**self).describe(locale)
    }
}

/// Reads `<dir>/<LOCALE>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source reading from `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The catalog directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the catalog for `locale`, or `None` if the code cannot name a
    /// file inside the directory.
    #[must_use]
    pub fn path_for(&self, locale: &LocaleCode) -> Option<PathBuf> {
        is_safe_file_stem(locale.as_str()).then(|| self.dir.join(locale.file_name()))
    }

    /// Create the catalog directory if it does not exist yet.
    ///
    /// Returns whether the directory had to be created.
    pub fn create_if_missing(&self) -> io::Result<bool> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        std::fs::create_dir_all(&self.dir)?;
        warn!("Created missing catalog directory {}", self.dir.display());
        Ok(true)
    }
}

impl CatalogSource for DirectorySource {
    fn read(&self, locale: &LocaleCode) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = self.path_for(locale) else {
            debug!(locale = %locale, "Locale code cannot be used as a file name");
            return Ok(None);
        };

        debug!("Reading catalog file {}", path.display());
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn describe(&self, locale: &LocaleCode) -> String {
        self.dir.join(locale.file_name()).display().to_string()
    }
}

/// Catalogs held in memory, keyed by locale.
///
/// Contents can be replaced at any time; a subsequent reload picks them up.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<HashMap<LocaleCode, Vec<u8>>>,
}

impl MemorySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(self, locale: impl Into<LocaleCode>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(locale, contents);
        self
    }

    /// Set the catalog for `locale`
    pub fn insert(&self, locale: impl Into<LocaleCode>, contents: impl Into<Vec<u8>>) {
        self.files.write().insert(locale.into(), contents.into());
    }

    /// Remove the catalog for `locale`, making it absent
    pub fn remove(&self, locale: &str) -> bool {
        self.files.write().remove(locale).is_some()
    }
}

impl CatalogSource for MemorySource {
    fn read(&self, locale: &LocaleCode) -> io::Result<Option<Vec<u8>>> {
        Ok(self.files.read().get(locale).cloned())
    }

    fn describe(&self, locale: &LocaleCode) -> String {
        format!("memory:{}", locale.file_name())
    }
}

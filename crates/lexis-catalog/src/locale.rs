//! Locale codes

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Locale every store falls back to unless configured otherwise.
pub const BASELINE_LOCALE: &str = "EN";

/// Short, case-sensitive locale identifier such as `"EN"` or `"zh-Hans"`.
///
/// Doubles as the file-name stem of the catalog: `EN` is read from `EN.json`.
/// Codes are not validated against any list of known locales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Create a locale code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The default baseline locale, `EN`
    #[must_use]
    pub fn baseline() -> Self {
        Self::new(BASELINE_LOCALE)
    }

    /// Get the code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the catalog file name for this locale
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl Default for LocaleCode {
    fn default() -> Self {
        Self::baseline()
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LocaleCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&String> for LocaleCode {
    fn from(code: &String) -> Self {
        Self(code.clone())
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

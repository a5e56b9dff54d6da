//! Locale type and the per-call locale context.
//!
//! `Locale` is the single canonical key used in translation maps. Whatever
//! form an external locale identifier comes in, it is turned into a plain
//! string before it touches a map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locale code (e.g., "en", "ru", "pt-BR").
///
/// Codes are compared case-sensitively, exactly as they are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from its code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the locale code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&String> for Locale {
    fn from(code: &String) -> Self {
        Self(code.clone())
    }
}

impl From<&Locale> for Locale {
    fn from(locale: &Locale) -> Self {
        locale.clone()
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The locale settings a field operation runs under.
///
/// Every read and write takes one of these explicitly instead of consulting
/// process-wide state, so two requests in different locales can work on the
/// same kind of record concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    current: Locale,
    default: Locale,
}

impl LocaleContext {
    /// Create a context.
    ///
    /// # Arguments
    /// * `current` - Locale that reads and scalar writes target
    /// * `default` - Locale used as the first fallback on non-strict reads
    pub fn new(current: impl Into<Locale>, default: impl Into<Locale>) -> Self {
        Self {
            current: current.into(),
            default: default.into(),
        }
    }

    pub fn current(&self) -> &Locale {
        &self.current
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Same default locale, different current locale.
    pub fn with_locale(&self, locale: impl Into<Locale>) -> Self {
        Self {
            current: locale.into(),
            default: self.default.clone(),
        }
    }
}

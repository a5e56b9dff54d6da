//! Locale registry: the set of locales an application offers.
//!
//! The registry is built once from configuration and handed to whoever needs
//! it. Field operations never consult it; it exists for callers that accept
//! locale codes from the outside and want to reject unknown ones.

use crate::error::{Error, Result};
use crate::i18n::{Locale, LocaleContext};

/// Available locales plus the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    available: Vec<Locale>,
    default: Locale,
}

impl LocaleRegistry {
    /// Create a registry.
    ///
    /// The default locale is added to the available set if it is missing.
    /// Duplicate codes are dropped, keeping the first occurrence.
    pub fn new<I, L>(available: I, default: impl Into<Locale>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Locale>,
    {
        let default = default.into();
        let mut locales: Vec<Locale> = Vec::new();
        for locale in available.into_iter().map(Into::into) {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        if !locales.contains(&default) {
            locales.insert(0, default.clone());
        }

        Self {
            available: locales,
            default,
        }
    }

    /// Get the default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Get all available locales, in configuration order.
    pub fn available(&self) -> &[Locale] {
        &self.available
    }

    /// Check if a locale code is available.
    pub fn is_available(&self, code: &str) -> bool {
        self.available.iter().any(|locale| locale.as_str() == code)
    }

    /// Validate an externally supplied locale code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is one of the available locales
    /// * `Err(Error::UnavailableLocale)` otherwise
    pub fn ensure_available(&self, code: &str) -> Result<Locale> {
        if self.is_available(code) {
            Ok(Locale::from(code))
        } else {
            Err(Error::UnavailableLocale {
                locale: code.to_string(),
            })
        }
    }

    /// Context whose current locale is the default one.
    pub fn context(&self) -> LocaleContext {
        LocaleContext::new(self.default.clone(), self.default.clone())
    }

    /// Context for a given current locale.
    pub fn context_for(&self, current: impl Into<Locale>) -> LocaleContext {
        LocaleContext::new(current, self.default.clone())
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new(["en"], "en")
    }
}

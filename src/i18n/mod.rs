//! Internationalization (i18n) context for localized attributes.
//!
//! # Architecture
//!
//! - `locale`: The `Locale` key type and the explicit per-call `LocaleContext`
//! - `registry`: Available locales and the default one, built from configuration
//!
//! # Example
//!
//! ```rust
//! use translateable::i18n::LocaleRegistry;
//!
//! let registry = LocaleRegistry::new(["en", "ru", "it"], "en");
//!
//! // Context for a request served in Russian
//! let cx = registry.context_for("ru");
//! assert_eq!(cx.default_locale().as_str(), "en");
//! ```

mod locale;
mod registry;

pub use locale::{Locale, LocaleContext};
pub use registry::LocaleRegistry;

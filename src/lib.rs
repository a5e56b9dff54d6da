//! Translations of an attribute stored in a single JSON column.
//!
//! A translateable attribute keeps one JSON object per row, mapping locale
//! codes to text. [`LocalizedField`] reads it through the current locale of a
//! [`LocaleContext`], falling back to the default locale and then to the first
//! stored entry, and writes either a single locale or the whole map.
//!
//! ```rust
//! use translateable::{GetOptions, LocaleContext, LocalizedField, DynamicRecord};
//!
//! let title = LocalizedField::new("title");
//! let mut record = DynamicRecord::new();
//!
//! let en = LocaleContext::new("en", "en");
//! title.set(&mut record, &en, "hello");
//! title.set(&mut record, &en.with_locale("ru"), "привет");
//!
//! assert_eq!(title.get(&record, &en, GetOptions::default()).as_deref(), Some("hello"));
//! assert_eq!(title.get(&record, &en.with_locale("it"), GetOptions::default()).as_deref(), Some("hello"));
//! assert_eq!(title.get(&record, &en.with_locale("it"), GetOptions::strict()), None);
//! ```

pub mod attributes;
pub mod config;
pub mod db;
pub mod error;
pub mod field;
pub mod i18n;
pub mod nested;
pub mod record;
pub mod retry;
pub mod translations;

pub use attributes::Translateable;
pub use error::{ConfigurationError, Error, Result};
pub use field::{FieldValue, GetOptions, LocalizedField, Record};
pub use i18n::{Locale, LocaleContext, LocaleRegistry};
pub use nested::{NestedAttributes, NestedEntry, PermittedAttributes};
pub use record::DynamicRecord;
pub use translations::{AttributeValue, Translations};

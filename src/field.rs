//! Locale-aware access to one translateable attribute.
//!
//! A `LocalizedField` is bound to an attribute name and works on any entity
//! implementing [`Record`]. The entity stores the raw [`Translations`] map;
//! the field decides which entry a reader sees and how writes are merged.

use crate::i18n::LocaleContext;
use crate::nested::{NestedAttributes, PermittedAttributes};
use crate::translations::{AttributeValue, Translations};

/// Storage side of an entity with translateable attributes.
pub trait Record {
    /// Whether the entity has not been persisted yet.
    fn is_new_record(&self) -> bool;

    /// Stored column value of an attribute. `None` means the column is null.
    fn read_attribute(&self, name: &str) -> Option<&Translations>;

    /// Replace the stored column value of an attribute.
    fn write_attribute(&mut self, name: &str, value: Translations);
}

/// Options for [`LocalizedField::get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Only return the current locale's translation, never a fallback.
    pub strict: bool,
}

impl GetOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Value accepted by [`LocalizedField::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text for the current locale, merged into the stored map.
    Current(String),
    /// A complete map replacing whatever was stored.
    All(Translations),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Current(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Current(value)
    }
}

impl From<Translations> for FieldValue {
    fn from(value: Translations) -> Self {
        FieldValue::All(value)
    }
}

/// Accessors for one translateable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedField {
    name: String,
}

impl LocalizedField {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attribute (and column) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the entries view, e.g. `title_translateable`.
    pub fn entries_attribute_name(&self) -> String {
        format!("{}_translateable", self.name)
    }

    /// Whitelist entry for this attribute's nested form input.
    pub fn permitted_attributes(&self) -> PermittedAttributes {
        PermittedAttributes::for_attribute(&self.name)
    }

    /// Raw map as seen by readers.
    ///
    /// A null or empty column reads as `{current: ""}` on a new record, so a
    /// form always has one row to render, and as `{}` on a persisted one.
    /// The placeholder is never written back.
    pub fn read<R: Record + ?Sized>(&self, record: &R, cx: &LocaleContext) -> Translations {
        match record.read_attribute(&self.name) {
            Some(stored) if !stored.is_empty() => stored.clone(),
            _ if record.is_new_record() => Translations::single(cx.current(), ""),
            _ => Translations::new(),
        }
    }

    /// Translation for the current locale.
    ///
    /// Falls back to the default locale and then to the first stored entry,
    /// unless `options.strict` is set. Returns `None` when nothing matches.
    pub fn get<R: Record + ?Sized>(
        &self,
        record: &R,
        cx: &LocaleContext,
        options: GetOptions,
    ) -> Option<String> {
        let translations = self.read(record, cx);
        lookup(&translations, cx, options).map(str::to_string)
    }

    /// Assign a value.
    ///
    /// A full map replaces the stored one. Text is stored under the current
    /// locale; other locales are left as they were.
    pub fn set<R, V>(&self, record: &mut R, cx: &LocaleContext, value: V)
    where
        R: Record + ?Sized,
        V: Into<FieldValue>,
    {
        let translations = match value.into() {
            FieldValue::All(translations) => translations,
            FieldValue::Current(data) => {
                let mut translations = record
                    .read_attribute(&self.name)
                    .cloned()
                    .unwrap_or_default();
                translations.insert(cx.current(), data);
                translations
            }
        };
        record.write_attribute(&self.name, translations);
    }

    /// Replace the stored map with the submitted nested entries.
    ///
    /// Entries marked `destroy` are skipped; for duplicate locales the later
    /// entry wins. Nothing from the previous value survives.
    pub fn set_from_nested_attributes<R: Record + ?Sized>(
        &self,
        record: &mut R,
        attributes: &NestedAttributes,
    ) {
        let mut translations = Translations::new();
        for entry in attributes.entries().filter(|entry| !entry.destroy) {
            translations.insert(&entry.locale, entry.data.clone());
        }
        record.write_attribute(&self.name, translations);
    }

    /// The read view as ordered `(locale, data)` pairs.
    pub fn list_as_entries<R: Record + ?Sized>(
        &self,
        record: &R,
        cx: &LocaleContext,
    ) -> Vec<AttributeValue> {
        self.read(record, cx).entries()
    }
}

/// Pick a translation: current locale, then (non-strict) default locale, then
/// (non-strict) the first entry.
pub fn lookup<'a>(
    translations: &'a Translations,
    cx: &LocaleContext,
    options: GetOptions,
) -> Option<&'a str> {
    if let Some(data) = translations.get(cx.current()) {
        return Some(data);
    }
    if options.strict {
        return None;
    }
    translations
        .get(cx.default_locale())
        .or_else(|| translations.first())
}

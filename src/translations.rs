//! Locale-keyed translation map stored in a single JSON column.
//!
//! `Translations` is the in-memory form of the column value: an
//! insertion-ordered map from locale code to translated text. Insertion order
//! matters because the last-resort lookup fallback is "first entry".

use crate::i18n::Locale;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Translations of one attribute, keyed by locale code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(IndexMap<String, String>);

impl Translations {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build a map holding a single translation.
    pub fn single(locale: impl Into<Locale>, data: impl Into<String>) -> Self {
        let mut translations = Self::new();
        translations.insert(locale, data);
        translations
    }

    /// Get the translation for a locale, if present.
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.0.get(locale.as_str()).map(String::as_str)
    }

    /// Set the translation for a locale.
    ///
    /// An existing locale keeps its position; a new one is appended.
    pub fn insert(&mut self, locale: impl Into<Locale>, data: impl Into<String>) {
        self.0.insert(locale.into().into_string(), data.into());
    }

    /// First translation in insertion order.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, data)| data.as_str())
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.0.contains_key(locale.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(locale, data)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(locale, data)| (locale.as_str(), data.as_str()))
    }

    /// Ordered `(locale, data)` pairs, one per stored translation.
    pub fn entries(&self) -> Vec<AttributeValue> {
        self.iter()
            .map(|(locale, data)| AttributeValue {
                locale: Locale::from(locale),
                data: data.to_string(),
            })
            .collect()
    }
}

impl<L, D> FromIterator<(L, D)> for Translations
where
    L: Into<Locale>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, D)>>(iter: I) -> Self {
        let mut translations = Self::new();
        for (locale, data) in iter {
            translations.insert(locale, data);
        }
        translations
    }
}

/// One translation as seen by form builders: a locale and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub locale: Locale,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut translations = Translations::new();
        translations.insert("en", "hello");
        translations.insert("ru", "привет");

        assert_eq!(translations.get(&Locale::from("en")), Some("hello"));
        assert_eq!(translations.get(&Locale::from("ru")), Some("привет"));
        assert_eq!(translations.get(&Locale::from("it")), None);
    }

    #[test]
    fn test_locale_keys_are_case_sensitive() {
        let translations = Translations::single("en", "hello");
        assert_eq!(translations.get(&Locale::from("EN")), None);
    }

    #[test]
    fn test_first_follows_insertion_order() {
        let translations: Translations = [("ru", "привет"), ("en", "hello"), ("de", "hallo")]
            .into_iter()
            .collect();

        assert_eq!(translations.first(), Some("привет"));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut translations: Translations =
            [("it", "ciao"), ("en", "hello")].into_iter().collect();
        translations.insert("it", "salve");

        assert_eq!(translations.first(), Some("salve"));
        assert_eq!(translations.len(), 2);
    }

    #[test]
    fn test_first_of_empty_is_none() {
        assert_eq!(Translations::new().first(), None);
        assert!(Translations::new().is_empty());
    }

    #[test]
    fn test_entries_are_ordered_pairs() {
        let translations: Translations = [("en", "hello"), ("ru", "")].into_iter().collect();
        let entries = translations.entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].locale.as_str(), "en");
        assert_eq!(entries[0].data, "hello");
        assert_eq!(entries[1].locale.as_str(), "ru");
        assert_eq!(entries[1].data, "");
    }

    #[test]
    fn test_serializes_as_plain_json_object() {
        let translations: Translations =
            [("en", "Hello World"), ("de", "Hallo Welt")].into_iter().collect();
        let json = serde_json::to_string(&translations).unwrap();

        assert_eq!(json, r#"{"en":"Hello World","de":"Hallo Welt"}"#);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let translations: Translations =
            serde_json::from_str(r#"{"ru":"привет мир","en":"hello world"}"#).unwrap();

        assert_eq!(translations.first(), Some("привет мир"));
    }

    #[test]
    fn test_deserialize_rejects_non_string_values() {
        let result: Result<Translations, _> = serde_json::from_str(r#"{"en": 42}"#);
        assert!(result.is_err());
    }
}

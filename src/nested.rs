//! Nested-attributes input from forms, and the whitelist describing it.
//!
//! A form that edits one row per locale submits something like
//!
//! ```json
//! { "0": { "locale": "it", "data": "volpe veloce" },
//!   "1": { "locale": "ru", "data": "прыгает через", "destroy": "1" } }
//! ```
//!
//! The index keys only keep the rows apart; they carry no meaning.

use crate::i18n::Locale;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Keys a nested-attributes entry may contain.
pub const NESTED_ENTRY_KEYS: [&str; 3] = ["locale", "data", "destroy"];

/// One submitted translation row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NestedEntry {
    pub locale: Locale,
    #[serde(default)]
    pub data: String,
    /// Rows marked for destruction are left out of the result.
    #[serde(default, alias = "_destroy", deserialize_with = "deserialize_truthy")]
    pub destroy: bool,
}

impl NestedEntry {
    pub fn new(locale: impl Into<Locale>, data: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            data: data.into(),
            destroy: false,
        }
    }

    /// Mark the entry for removal.
    pub fn destroyed(mut self) -> Self {
        self.destroy = true;
        self
    }
}

/// A collection of nested entries, either index-keyed or a plain list.
///
/// Both forms are processed in the order they were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NestedAttributes {
    Indexed(IndexMap<String, NestedEntry>),
    List(Vec<NestedEntry>),
}

impl NestedAttributes {
    /// Iterate over entries in submission order, ignoring index keys.
    pub fn entries(&self) -> Box<dyn Iterator<Item = &NestedEntry> + '_> {
        match self {
            NestedAttributes::Indexed(map) => Box::new(map.values()),
            NestedAttributes::List(list) => Box::new(list.iter()),
        }
    }
}

impl From<Vec<NestedEntry>> for NestedAttributes {
    fn from(entries: Vec<NestedEntry>) -> Self {
        NestedAttributes::List(entries)
    }
}

impl FromIterator<NestedEntry> for NestedAttributes {
    fn from_iter<I: IntoIterator<Item = NestedEntry>>(iter: I) -> Self {
        NestedAttributes::List(iter.into_iter().collect())
    }
}

/// Any value other than `null` and `false` marks the entry, including `0`,
/// `"0"` and `"false"`.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Whitelist entry for one translateable attribute.
///
/// Serializes as `{ "<attr>_nested_attributes": ["locale", "data", "destroy"] }`,
/// the shape parameter filters expect for nested hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermittedAttributes {
    key: String,
}

impl PermittedAttributes {
    pub fn for_attribute(attribute: &str) -> Self {
        Self {
            key: format!("{}_nested_attributes", attribute),
        }
    }

    /// The nested parameter name, e.g. `title_nested_attributes`.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Serialize for PermittedAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &NESTED_ENTRY_KEYS)?;
        map.end()
    }
}

//! A row with translateable columns, as loaded from and saved to the database.

use crate::field::Record;
use crate::translations::Translations;
use indexmap::IndexMap;

/// Translateable columns of one table row.
///
/// `id` is `None` until the row has been inserted. Columns map to `None` when
/// the stored value is SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicRecord {
    id: Option<i64>,
    columns: IndexMap<String, Option<Translations>>,
}

impl DynamicRecord {
    /// An unsaved row.
    pub fn new() -> Self {
        Self::default()
    }

    /// A row that already exists under `id`.
    pub fn persisted(id: i64) -> Self {
        Self {
            id: Some(id),
            columns: IndexMap::new(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Called by the database layer once the row has been inserted.
    pub(crate) fn mark_persisted(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Set a column directly, including to `NULL`.
    pub fn set_column(&mut self, name: impl Into<String>, value: Option<Translations>) {
        self.columns.insert(name.into(), value);
    }

    /// Column names in the order they were first set.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns with their raw values, in the order they were first set.
    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&Translations>)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }
}

impl Record for DynamicRecord {
    fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    fn read_attribute(&self, name: &str) -> Option<&Translations> {
        self.columns.get(name).and_then(Option::as_ref)
    }

    fn write_attribute(&mut self, name: &str, value: Translations) {
        self.columns.insert(name.to_string(), Some(value));
    }
}

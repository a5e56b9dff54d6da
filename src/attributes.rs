//! Registration of translateable attributes on a table.
//!
//! Registration is the only step that can fail: every attribute has to name
//! an existing column. The check needs column information from the database;
//! when that is not available it is skipped rather than treated as an error.

use crate::config::Config;
use crate::db::ColumnInfo;
use crate::error::{ConfigurationError, Result};
use crate::field::LocalizedField;
use crate::nested::PermittedAttributes;
use tracing::debug;

/// Column types that can hold a translation map.
const JSON_TYPES: [&str; 2] = ["json", "jsonb"];

/// The translateable attributes registered for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translateable {
    table: String,
    fields: Vec<LocalizedField>,
}

impl Translateable {
    /// Register attributes of `table`.
    ///
    /// # Arguments
    /// * `table` - Table the attributes live in (used in error messages)
    /// * `attributes` - Attribute names; each must match a column
    /// * `columns` - Introspected columns, or `None` when no connection is available
    /// * `config` - `disable_sanity_check` and `strict_column_type` apply here
    ///
    /// # Returns
    /// * `Ok(Translateable)` with one field per distinct attribute
    /// * `Err(Error::Configuration)` if a column is missing, or is not JSON in strict mode
    pub fn register<S: AsRef<str>>(
        table: &str,
        attributes: &[S],
        columns: Option<&[ColumnInfo]>,
        config: &Config,
    ) -> Result<Self> {
        let mut fields: Vec<LocalizedField> = Vec::with_capacity(attributes.len());

        for attribute in attributes.iter().map(AsRef::as_ref) {
            if config.disable_sanity_check {
                debug!("Sanity check disabled, not verifying '{}.{}'", table, attribute);
            } else if let Some(columns) = columns {
                check_column(table, attribute, columns, config.strict_column_type)?;
            } else {
                debug!(
                    "No column information for '{}', assuming '{}' exists",
                    table, attribute
                );
            }

            if fields.iter().all(|field| field.name() != attribute) {
                fields.push(LocalizedField::new(attribute));
            }
        }

        debug!("Registered {} translateable attribute(s) on '{}'", fields.len(), table);
        Ok(Self {
            table: table.to_string(),
            fields,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Get the field for an attribute name.
    pub fn field(&self, name: &str) -> Option<&LocalizedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// All registered fields, in registration order.
    pub fn fields(&self) -> &[LocalizedField] {
        &self.fields
    }

    /// Whitelist for nested form input, one entry per registered attribute.
    pub fn permitted_nested_attributes(&self) -> Vec<PermittedAttributes> {
        self.fields
            .iter()
            .map(LocalizedField::permitted_attributes)
            .collect()
    }
}

fn check_column(
    table: &str,
    attribute: &str,
    columns: &[ColumnInfo],
    strict_column_type: bool,
) -> std::result::Result<(), ConfigurationError> {
    let column = columns
        .iter()
        .find(|column| column.name == attribute)
        .ok_or_else(|| ConfigurationError::NoSuchColumn {
            table: table.to_string(),
            column: attribute.to_string(),
        })?;

    if strict_column_type && !JSON_TYPES.contains(&column.data_type.as_str()) {
        return Err(ConfigurationError::NotJsonColumn {
            table: table.to_string(),
            column: attribute.to_string(),
            data_type: column.data_type.clone(),
        });
    }

    Ok(())
}

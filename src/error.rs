//! Error types for translateable attributes.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Attribute setup does not match the database schema.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("given locale '{locale}' is not available")]
    UnavailableLocale { locale: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Raised while registering translateable attributes, never afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no such column '{column}' in '{table}'")]
    NoSuchColumn { table: String, column: String },

    #[error("column '{column}' in '{table}' has type '{data_type}', expected json or jsonb")]
    NotJsonColumn {
        table: String,
        column: String,
        data_type: String,
    },
}

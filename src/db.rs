//! PostgreSQL access for translateable columns.
//!
//! Covers what the attribute layer needs from a live database: a liveness
//! probe and column introspection for registration, plus loading and saving
//! the JSON columns of a row. Rows are identified by an integer `id` column.

use crate::attributes::Translateable;
use crate::config::Config;
use crate::error::Result;
use crate::record::DynamicRecord;
use crate::retry::{with_retry_if, RetryConfig};
use crate::translations::Translations;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::Row;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Name and SQL type of a table column, as reported by `information_schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL, retrying transient connection failures
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with_retry(database_url, &RetryConfig::database_connect()).await
    }

    pub async fn connect_with_retry(database_url: &str, retry: &RetryConfig) -> Result<Self> {
        let pool = with_retry_if(
            retry,
            "database connect",
            || {
                PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect(database_url)
            },
            is_transient,
        )
        .await?;

        info!("Connected to database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check whether the connection is usable
    pub async fn is_active(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Database connection is not active: {}", e);
                false
            }
        }
    }

    /// Columns of a table in the current schema, in definition order.
    ///
    /// A table that does not exist has no columns.
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = sqlx::query(
            "SELECT column_name::text AS name, data_type::text AS data_type
             FROM information_schema.columns
             WHERE table_schema = current_schema() AND table_name = $1
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        let columns = rows
            .iter()
            .map(|row| {
                Ok(ColumnInfo {
                    name: row.try_get("name")?,
                    data_type: row.try_get("data_type")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

        Ok(columns)
    }

    /// Register translateable attributes of `table`, checking them against
    /// the live schema.
    ///
    /// If the connection is down or the schema cannot be read, the column
    /// check is skipped and the attributes are registered as given.
    pub async fn register_translateable<S: AsRef<str>>(
        &self,
        table: &str,
        attributes: &[S],
        config: &Config,
    ) -> Result<Translateable> {
        if config.disable_sanity_check {
            return Translateable::register(table, attributes, None, config);
        }

        let columns = if self.is_active().await {
            match self.columns(table).await {
                Ok(columns) => Some(columns),
                Err(e) => {
                    warn!("Could not read columns of '{}', skipping check: {}", table, e);
                    None
                }
            }
        } else {
            warn!("No active database connection, skipping column check for '{}'", table);
            None
        };

        Translateable::register(table, attributes, columns.as_deref(), config)
    }

    /// Load the given JSON columns of a row.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - persisted record with every requested column set
    /// * `Ok(None)` - no row with this id
    pub async fn find<S: AsRef<str>>(
        &self,
        table: &str,
        id: i64,
        columns: &[S],
    ) -> Result<Option<DynamicRecord>> {
        let sql = select_sql(table, columns);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            debug!("No row {} in '{}'", id, table);
            return Ok(None);
        };

        let mut record = DynamicRecord::persisted(id);
        for column in columns.iter().map(AsRef::as_ref) {
            let value: Option<Json<Translations>> = row.try_get(column)?;
            record.set_column(column, value.map(|json| json.0));
        }

        Ok(Some(record))
    }

    /// Insert a new record or update an existing one.
    ///
    /// A new record gets its id assigned and is persisted afterwards.
    /// Returns the record's id.
    pub async fn save(&self, table: &str, record: &mut DynamicRecord) -> Result<i64> {
        let names: Vec<String> = record.column_names().map(str::to_string).collect();
        let values: Vec<Option<Json<Translations>>> = record
            .columns()
            .map(|(_, value)| value.cloned().map(Json))
            .collect();

        match record.id() {
            None => {
                let sql = insert_sql(table, &names);
                let mut query = sqlx::query(&sql);
                for value in values {
                    query = query.bind(value);
                }
                let row = query.fetch_one(&self.pool).await?;
                let id: i64 = row.try_get("id")?;

                record.mark_persisted(id);
                debug!("Inserted row {} into '{}'", id, table);
                Ok(id)
            }
            Some(id) => {
                if names.is_empty() {
                    return Ok(id);
                }

                let sql = update_sql(table, &names);
                let mut query = sqlx::query(&sql);
                for value in values {
                    query = query.bind(value);
                }
                let result = query.bind(id).execute(&self.pool).await?;

                if result.rows_affected() == 0 {
                    warn!("Row {} in '{}' was not found for update", id, table);
                } else {
                    debug!("Updated row {} in '{}'", id, table);
                }
                Ok(id)
            }
        }
    }
}

/// Only connection-level failures are worth retrying
fn is_transient(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
}

/// Quote an SQL identifier, doubling embedded quotes
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_list<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|column| quote_ident(column.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_sql<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    if columns.is_empty() {
        return format!("SELECT id FROM {} WHERE id = $1", quote_ident(table));
    }
    format!(
        "SELECT {} FROM {} WHERE id = $1",
        column_list(columns),
        quote_ident(table)
    )
}

fn insert_sql<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    if columns.is_empty() {
        return format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING id::bigint AS id",
            quote_ident(table)
        );
    }

    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id::bigint AS id",
        quote_ident(table),
        column_list(columns),
        placeholders
    )
}

fn update_sql<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", quote_ident(column.as_ref()), i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE id = ${}",
        quote_ident(table),
        assignments,
        columns.len() + 1
    )
}

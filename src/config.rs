use crate::i18n::LocaleRegistry;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: Option<String>,

    // Column checks at registration
    pub disable_sanity_check: bool,
    pub strict_column_type: bool,

    // Locales
    pub available_locales: Vec<String>,
    pub default_locale: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let available_locales = std::env::var("AVAILABLE_LOCALES")
            .ok()
            .map(|v| parse_locale_list(&v))
            .filter(|locales| !locales.is_empty())
            .unwrap_or_else(|| vec!["en".to_string()]);

        let default_locale = std::env::var("DEFAULT_LOCALE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| available_locales[0].clone());

        Ok(Self {
            // Database
            database_url: std::env::var("DATABASE_URL").ok(),

            // Any value disables the check, including an empty one
            disable_sanity_check: std::env::var_os("DISABLE_TRANSLATEABLE_SANITY_CHECK").is_some(),
            strict_column_type: match std::env::var("TRANSLATEABLE_STRICT_COLUMN_TYPE") {
                Ok(v) => parse_flag(&v).context("TRANSLATEABLE_STRICT_COLUMN_TYPE is invalid")?,
                Err(_) => false,
            },

            // Locales
            available_locales,
            default_locale,
        })
    }

    /// Database URL, required by anything that talks to PostgreSQL.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL not set")
    }

    pub fn locale_registry(&self) -> LocaleRegistry {
        LocaleRegistry::new(&self.available_locales, self.default_locale.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            disable_sanity_check: false,
            strict_column_type: false,
            available_locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

fn parse_locale_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

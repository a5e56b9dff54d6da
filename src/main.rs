use anyhow::{bail, Context, Result};
use tracing::info;
use translateable::{config, db::Database};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translateable=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(table) = args.next() else {
        bail!("usage: translateable-check <table> <attribute>...");
    };
    let attributes: Vec<String> = args.collect();
    if attributes.is_empty() {
        bail!("usage: translateable-check <table> <attribute>...");
    }

    // Load configuration from environment
    let config = config::Config::from_env()?;

    info!("Checking translateable attributes of '{}'", table);
    let db = Database::connect(config.require_database_url()?)
        .await
        .context("Failed to connect to database")?;

    let translateable = db
        .register_translateable(&table, attributes.as_slice(), &config)
        .await
        .with_context(|| format!("Invalid translateable attributes on '{}'", table))?;

    info!(
        "✓ {} attribute(s) registered on '{}'",
        translateable.fields().len(),
        translateable.table()
    );

    // Whitelist for nested form parameters
    let permitted = serde_json::to_string_pretty(&translateable.permitted_nested_attributes())
        .context("Failed to serialize permitted attributes")?;
    println!("{}", permitted);

    Ok(())
}

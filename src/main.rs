//! Provisioning entry point: prepares the database a deployment runs
//! against and prints the latest bundle's aggregate prices. The web layer
//! serving the ordering tables lives elsewhere and shares the database.

use dotenvy::dotenv;
use food_order::{config, core, errors::Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed the catalog (if a config.toml is present)
    match config::catalog::load_default_catalog() {
        Ok(catalog) => {
            config::catalog::seed_catalog(&db, &catalog)
                .await
                .inspect_err(|e| error!("Failed to seed catalog: {e}"))?;
            info!("Catalog seeded from config.toml.");
        }
        Err(e) => warn!("No catalog seeded: {e}"),
    }

    // 5. Report on the latest bundle, if any
    if let Some(bundle) = core::bundle::latest_bundle(&db).await? {
        let ordered = core::bundle::price_for_all(&db, bundle.id, false).await?;
        let delivered = core::bundle::price_for_all(&db, bundle.id, true).await?;
        let unknown = core::bundle::has_unknown_price(&db, bundle.id, None, false).await?;
        info!(
            bundle = bundle.id,
            open = bundle.open,
            ordered = %core::report::format_price(ordered),
            delivered = %core::report::format_price(delivered),
            has_unknown_price = unknown,
            "Latest bundle"
        );
    } else {
        info!("No bundles recorded yet.");
    }

    Ok(())
}

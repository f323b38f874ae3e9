//! # homestock: household inventory report
//!
//! Composition root that wires the adapters together and prints the
//! inventory report of one home as JSON.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging (stderr; stdout carries the report)
//! - Load the JSON snapshot and the persisted session token
//! - Construct application services, injecting adapters via port traits
//! - Render the dashboard and the item list, print them to stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use homestock_adapter_snapshot_json::{FileTokenStore, JsonInventoryApi};
use homestock_app::item_list::ItemListView;
use homestock_app::services::inventory_service::{InventoryReport, InventoryService};
use homestock_app::session::SessionContext;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let report = run(&config).await?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{json}");

    Ok(())
}

async fn run(config: &Config) -> anyhow::Result<InventoryReport> {
    // Snapshot
    let store = homestock_adapter_snapshot_json::Config {
        path: config.snapshot.path.clone(),
    }
    .build()
    .await
    .with_context(|| format!("failed to load snapshot {}", config.snapshot.path.display()))?;
    let api = JsonInventoryApi::new(Arc::new(store));

    // Session
    let session = Arc::new(SessionContext::new(FileTokenStore::new(
        config.session.token_file.clone(),
    )));
    match &config.session.token {
        Some(token) => session.set_token(token.as_str()).await?,
        None => {
            let restored = session.init().await?;
            if !restored {
                tracing::info!("no persisted session token, continuing anonymously");
            }
        }
    }

    // Services
    let inventory = InventoryService::new(api, session, config.low_stock_threshold());
    let view = ItemListView::with_state(config.filter_state(), config.sort_state());

    let report = inventory.report(config.home_id(), &view).await?;
    Ok(report)
}

//! `shelfwatch` — print the dashboard for the seeded café inventory.
//!
//! Environment:
//! - `SHELFWATCH_CATEGORY`: category to select before rendering (default `All`)
//! - `SHELFWATCH_OUTPUT`: `text` (default) or `json`
//! - `SHELFWATCH_LOW_FACTOR`, `SHELFWATCH_TREND_TOLERANCE`, `SHELFWATCH_AUTO_ALERTS`:
//!   store tuning, see `StoreConfig`
//! - `SHELFWATCH_LOG_FORMAT`, `RUST_LOG`: logging

use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;

use shelfwatch_inventory::{
    DashboardSummary, Event, InventoryStore, StoreConfig, StoreSnapshot, fixtures,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonDashboard {
    summary: DashboardSummary,
    categories: Vec<String>,
    #[serde(flatten)]
    snapshot: StoreSnapshot,
}

fn main() -> anyhow::Result<()> {
    shelfwatch_observability::init();

    let config = StoreConfig::from_env();
    let now = Utc::now();
    let mut store =
        InventoryStore::new(fixtures::seed(now), config).context("invalid store configuration")?;
    tracing::info!(
        items = store.items().len(),
        alerts = store.alerts().len(),
        sensors = store.sensors().len(),
        "store seeded"
    );

    let updates = store.subscribe();

    if let Ok(category) = std::env::var("SHELFWATCH_CATEGORY") {
        store.set_selected_category(category);
    }

    for event in updates.drain() {
        tracing::debug!(event_type = event.event_type(), "store changed");
    }

    let output = match std::env::var("SHELFWATCH_OUTPUT").as_deref() {
        Ok("json") => OutputMode::Json,
        Ok("text") | Err(_) => OutputMode::Text,
        Ok(other) => {
            tracing::warn!(value = other, "unknown SHELFWATCH_OUTPUT; using text");
            OutputMode::Text
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match output {
        OutputMode::Text => {
            let text = shelfwatch_dashboard::render_dashboard(&store, Utc::now());
            out.write_all(text.as_bytes())
                .context("failed to write dashboard")?;
        }
        OutputMode::Json => {
            let doc = JsonDashboard {
                summary: store.summary(),
                categories: store.categories(),
                snapshot: store.snapshot(),
            };
            serde_json::to_writer_pretty(&mut out, &doc).context("failed to serialize dashboard")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

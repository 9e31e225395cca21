#![allow(clippy::result_large_err)]

use chrono::Utc;
use dotenvy::dotenv;
use quality_cockpit::config::paths;
use quality_cockpit::config::settings::{Settings, load_settings};
use quality_cockpit::errors::Result;
use quality_cockpit::pages::Cockpit;
use quality_cockpit::store::{Dataset, QualityStore};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Load settings (defaults when the file is absent)
    let settings = load_settings(paths::config_path())
        .inspect(|s| info!(overdue_cap = s.overdue_cap, "Settings loaded"))
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Load the dataset
    let dataset_path = paths::dataset_path();
    let dataset = Dataset::load(&dataset_path)
        .inspect(|_| info!("Dataset loaded from {}", dataset_path.display()))
        .inspect_err(|e| error!("Failed to load dataset: {}", e))?;
    let mut store = QualityStore::new(dataset);
    let mut cockpit = Cockpit::new();

    // 5. First pass: escalate, render, print
    run_cycle(&mut store, &mut cockpit, &settings)
        .inspect_err(|e| error!("Refresh cycle failed: {}", e))?;

    // 6. Optionally keep escalating on a fixed interval until Ctrl-C
    if settings.escalation_interval_secs == 0 {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(settings.escalation_interval_secs));
    // The first tick completes immediately and the first pass already ran
    ticker.tick().await;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = settings.escalation_interval_secs,
        "Watching for overdue CAPAs, press Ctrl-C to stop"
    );
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A failed cycle is retried on the next tick
                if let Err(e) = run_cycle(&mut store, &mut cockpit, &settings) {
                    error!("Refresh cycle failed: {}", e);
                }
            }
            result = &mut shutdown => {
                if let Err(e) = result {
                    error!("Failed to listen for Ctrl-C: {}", e);
                }
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Escalates overdue CAPAs, refreshes every table and chart, and prints the page.
fn run_cycle(store: &mut QualityStore, cockpit: &mut Cockpit, settings: &Settings) -> Result<()> {
    let now = Utc::now();
    store.escalate_overdue(now);
    cockpit.refresh(store, settings, now);
    println!("{}", cockpit.to_text());

    if let Some(path) = &settings.html_report {
        cockpit.write_html(path)?;
    }
    Ok(())
}

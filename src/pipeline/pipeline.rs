// src/pipeline/pipeline.rs

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::services::DataMallClient;
use crate::storage::Store;

use super::fetch::run_fetch;
use super::load::run_load;
use super::report::run_report;

/// Run the full pipeline: fetch both resources, load the store, write the
/// report to `out`.
pub async fn run_pipeline(config: &Config, account_key: &str, out: &mut dyn Write) -> Result<()> {
    log::info!("Step 1/4: Fetching bus stops");
    let stops_client = DataMallClient::new(&config.api, &config.api.stops_endpoint, account_key)?;
    run_fetch(&stops_client, &config.paths.stops_file, "bus stops").await?;

    log::info!("Step 2/4: Fetching bus routes");
    let routes_client = DataMallClient::new(&config.api, &config.api.routes_endpoint, account_key)?;
    run_fetch(&routes_client, &config.paths.routes_file, "bus routes").await?;

    log::info!("Step 3/4: Loading into {}", config.paths.database);
    let mut store = Store::open(&config.paths.database)?;
    run_load(&mut store, &config.paths.stops_file, &config.paths.routes_file).await?;

    log::info!("Step 4/4: Building stop-services report");
    let entries = run_report(&store, out)?;
    log::info!("Report complete: {entries} stops");

    Ok(())
}

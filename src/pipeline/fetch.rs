// src/pipeline/fetch.rs

//! Paginated fetch-and-checkpoint stage.
//!
//! Drives the offset loop for one resource: fetch a page, append it to the
//! checkpoint file, advance the offset by the page length, stop on the first
//! empty page. The server's own data size is the only bound on iteration; a
//! fetch or write failure aborts immediately and leaves the partial
//! checkpoint on disk.

use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::services::PageSource;
use crate::storage::CheckpointWriter;
use crate::storage::checkpoint;

/// Fetch every page from `source`, appending each to `writer`.
///
/// Returns the total record count. The offset of each append equals the
/// cumulative record count before that page, so checkpoint lines carry
/// strictly increasing offsets 0, |P1|, |P1|+|P2|, ...
pub async fn paginate(source: &dyn PageSource, writer: &mut CheckpointWriter) -> Result<u64> {
    let mut offset = 0u64;
    let mut total = 0u64;

    loop {
        let page = source.fetch_page(offset).await?;
        if page.is_empty() {
            break;
        }
        writer.append(offset, &page.records).await?;

        total += page.len() as u64;
        log::info!("offset {}: fetched {} records", offset, page.len());
        offset += page.len() as u64;
    }

    Ok(total)
}

/// Fetch one resource into `output`: paginate into the checkpoint file, then
/// aggregate it and replace it with the final artifact.
///
/// Returns the aggregated records.
pub async fn run_fetch(
    source: &dyn PageSource,
    output: impl AsRef<Path>,
    label: &str,
) -> Result<Vec<Value>> {
    let output = output.as_ref();

    log::info!("[START] Fetch {label}");
    let total = {
        // The writer lives exactly as long as the loop; any abort drops the
        // handle and keeps the lines written so far.
        let mut writer = CheckpointWriter::create(output).await?;
        paginate(source, &mut writer).await?
    };
    log::info!("Fetched {total} {label}.");
    log::info!("[END]   Fetch {label}");

    log::info!("[START] Collect {label}");
    let records = checkpoint::aggregate(output).await?;
    log::info!("[END]   Collect {label}");

    log::info!("[START] Write {label}");
    checkpoint::persist(output, &records).await?;
    log::info!("[END]   Write {label}");

    Ok(records)
}

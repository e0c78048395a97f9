// src/models/mod.rs

//! Domain models for the ingestion pipeline.

mod page;
mod record;
mod report;

// Re-export all public types
pub use page::{Page, PageEnvelope};
pub use record::{OrderedRecord, ROUTE_COLUMNS, STOP_COLUMNS};
pub use report::StopServices;

// src/pipeline/mod.rs

//! Pipeline entry points for ingestion operations.
//!
//! - `run_fetch`: paginate one resource into its final artifact file
//! - `run_load`: load both artifacts into the SQLite store
//! - `run_report`: emit the joined stop→services report
//! - `run_pipeline`: all of the above, in order

pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod report;

pub use fetch::run_fetch;
pub use load::run_load;
pub use pipeline::run_pipeline;
pub use report::run_report;

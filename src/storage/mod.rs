// src/storage/mod.rs

//! Durable state: the on-disk checkpoint file and the SQLite store.
//!
//! ## Artifact lifecycle
//!
//! ```text
//! fetch loop ──append──▶ checkpoint file      (one "NNNN: [records]" line per page)
//!                             │
//!                        aggregate
//!                             ▼
//!                      final artifact         (single JSON array, same path)
//!                             │
//!                           load
//!                             ▼
//!                      datamall.sqlite        (bus_stops, bus_routes)
//! ```
//!
//! The checkpoint file is the sole durable record of in-progress fetching;
//! the final artifact replaces it in place once aggregation succeeds.

pub mod checkpoint;
pub mod store;

pub use checkpoint::CheckpointWriter;
pub use store::Store;

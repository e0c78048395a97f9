// src/services/mod.rs

//! Remote API access.

mod datamall;

pub use datamall::{DataMallClient, PageSource};

// src/lib.rs

//! DataMall bus reference data ingestion library.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;

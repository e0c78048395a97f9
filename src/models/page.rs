// src/models/page.rs

//! One API response's worth of records.

use serde::Deserialize;
use serde_json::Value;

/// Response envelope returned by every DataMall resource endpoint.
///
/// The body carries OData metadata alongside a `value` array; only the array
/// matters here. A missing `value` is treated as an empty page.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope {
    #[serde(default)]
    pub value: Vec<Value>,
}

/// A page of records together with the offset it was requested at.
#[derive(Debug, Clone)]
pub struct Page {
    /// Cursor position (count of records already retrieved) for this request
    pub offset: u64,

    /// Records in response order
    pub records: Vec<Value>,
}

impl Page {
    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An empty page terminates pagination.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

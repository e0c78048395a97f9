// src/pipeline/report.rs

//! Stop→services report stage.

use std::io::Write;

use crate::error::Result;
use crate::storage::Store;

/// Build the joined report and write it as a JSON array to `out`.
///
/// Returns the number of report entries.
pub fn run_report(store: &Store, out: &mut dyn Write) -> Result<usize> {
    let report = store.build_report()?;
    serde_json::to_writer(&mut *out, &report)?;
    out.flush()?;
    Ok(report.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_report_written_as_json_array() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .load_stops(&[json!({
                "BusStopCode": "01012",
                "RoadName": "Victoria St",
                "Description": "Hotel Grand Pacific",
                "Latitude": 1.3,
                "Longitude": 103.8,
            })])
            .unwrap();

        let mut buffer = Vec::new();
        let count = run_report(&store, &mut buffer).unwrap();
        assert_eq!(count, 1);

        let parsed: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed[0]["code"], "01012");
        assert_eq!(parsed[0]["services"], json!([]));
    }

    #[test]
    fn test_empty_store_writes_empty_array() {
        let store = Store::open_in_memory().unwrap();
        let mut buffer = Vec::new();
        let count = run_report(&store, &mut buffer).unwrap();
        assert_eq!(count, 0);
        assert_eq!(buffer, b"[]");
    }
}

// src/models/record.rs

//! Ordered-value-list view of a fetched record.
//!
//! Records travel through the pipeline as raw JSON objects whose field order
//! is preserved from the API response (`serde_json` is built with
//! `preserve_order`). The relational loader binds those values to columns by
//! position, never by name, so the column orders below are the contract
//! between the API's record shape and the table definitions.

use serde_json::Value;

use crate::error::{AppError, Result};

/// Column order of the `bus_stops` table, matching the field order of a
/// DataMall BusStops record.
pub const STOP_COLUMNS: [&str; 5] = [
    "bus_stop_code",
    "road_name",
    "description",
    "latitude",
    "longitude",
];

/// Column order of the `bus_routes` table, matching the field order of a
/// DataMall BusRoutes record.
pub const ROUTE_COLUMNS: [&str; 12] = [
    "service_no",
    "operator",
    "direction",
    "stop_sequence",
    "bus_stop_code",
    "distance",
    "wd_first_bus",
    "wd_last_bus",
    "sat_first_bus",
    "sat_last_bus",
    "sun_first_bus",
    "sun_last_bus",
];

/// A record's scalar values in source field order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRecord(Vec<Value>);

impl OrderedRecord {
    /// Extract the values of a JSON object record, in source field order.
    ///
    /// Fails if the record is not an object or its field count does not match
    /// the expected column count.
    pub fn from_json(record: &Value, width: usize) -> Result<Self> {
        let object = record.as_object().ok_or_else(|| {
            AppError::validation(format!("record is not a JSON object: {record}"))
        })?;
        if object.len() != width {
            return Err(AppError::validation(format!(
                "record has {} fields, expected {}",
                object.len(),
                width
            )));
        }
        Ok(Self(object.values().cloned().collect()))
    }

    /// Values in positional order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_order_preserved() {
        let record = json!({"ServiceNo": "10", "Operator": "SBST", "Direction": 1});
        let ordered = OrderedRecord::from_json(&record, 3).unwrap();
        assert_eq!(
            ordered.values(),
            &[json!("10"), json!("SBST"), json!(1)]
        );
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let record = json!({"BusStopCode": "01012"});
        assert!(OrderedRecord::from_json(&record, STOP_COLUMNS.len()).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(OrderedRecord::from_json(&json!([1, 2, 3]), 3).is_err());
    }
}

// src/models/report.rs

//! Joined stop→services report entry.

use serde::{Deserialize, Serialize};

/// One bus stop's attributes plus the distinct service numbers serving it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StopServices {
    /// Bus stop code (unique identifier)
    pub code: String,

    /// Road the stop is on
    pub road_name: String,

    /// Human-readable stop description
    pub description: String,

    /// Stop latitude
    pub latitude: f64,

    /// Stop longitude
    pub longitude: f64,

    /// Distinct service numbers calling at this stop, ascending
    pub services: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_entry_json_shape() {
        let entry = StopServices {
            code: "01012".to_string(),
            road_name: "Victoria St".to_string(),
            description: "Hotel Grand Pacific".to_string(),
            latitude: 1.29684825487647,
            longitude: 103.85253591654006,
            services: vec!["2".to_string(), "12".to_string()],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["code"], "01012");
        assert_eq!(json["services"][1], "12");
    }
}

// src/pipeline/load.rs

//! Artifact-to-store load stage.

use std::path::Path;

use crate::error::Result;
use crate::storage::Store;
use crate::storage::checkpoint::read_artifact;

/// Load both final artifacts into the store. Returns (stop rows, route rows).
///
/// Each table load is one transaction; a failure on either artifact leaves
/// that table untouched.
pub async fn run_load(
    store: &mut Store,
    stops_path: impl AsRef<Path>,
    routes_path: impl AsRef<Path>,
) -> Result<(usize, usize)> {
    let stops = read_artifact(stops_path).await?;
    let stop_rows = store.load_stops(&stops)?;
    log::info!("Inserted {stop_rows} rows into bus_stops");

    let routes = read_artifact(routes_path).await?;
    let route_rows = store.load_routes(&routes)?;
    log::info!("Inserted {route_rows} rows into bus_routes");

    Ok((stop_rows, route_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_artifacts() {
        let tmp = TempDir::new().unwrap();
        let stops_path = tmp.path().join("bus_stops.json");
        let routes_path = tmp.path().join("bus_routes.json");

        let stops = vec![json!({
            "BusStopCode": "01012",
            "RoadName": "Victoria St",
            "Description": "Hotel Grand Pacific",
            "Latitude": 1.29684825487647,
            "Longitude": 103.85253591654006,
        })];
        let routes = vec![json!({
            "ServiceNo": "2",
            "Operator": "GAS",
            "Direction": 1,
            "StopSequence": 4,
            "BusStopCode": "01012",
            "Distance": 0.9,
            "WD_FirstBus": "0610",
            "WD_LastBus": "0011",
            "SAT_FirstBus": "0610",
            "SAT_LastBus": "0011",
            "SUN_FirstBus": "0610",
            "SUN_LastBus": "0011",
        })];
        std::fs::write(&stops_path, serde_json::to_vec(&stops).unwrap()).unwrap();
        std::fs::write(&routes_path, serde_json::to_vec(&routes).unwrap()).unwrap();

        let mut store = Store::open_in_memory().unwrap();
        let (stop_rows, route_rows) = run_load(&mut store, &stops_path, &routes_path)
            .await
            .unwrap();
        assert_eq!(stop_rows, 1);
        assert_eq!(route_rows, 1);

        let report = store.build_report().unwrap();
        assert_eq!(report[0].code, "01012");
        assert_eq!(report[0].services, vec!["2"]);
    }

    #[tokio::test]
    async fn test_missing_artifact_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let mut store = Store::open_in_memory().unwrap();

        let result = run_load(
            &mut store,
            tmp.path().join("missing.json"),
            tmp.path().join("also_missing.json"),
        )
        .await;
        assert!(result.is_err());
    }
}

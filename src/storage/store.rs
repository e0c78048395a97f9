// src/storage/store.rs

//! SQLite store for the loaded reference data.
//!
//! Records are inserted positionally: each record's values bind to the
//! table's columns in source field order (see [`crate::models::STOP_COLUMNS`]
//! and [`crate::models::ROUTE_COLUMNS`]), with no name-based reconciliation.
//!
//! The two schemas differ deliberately: `bus_stops` has a primary key on the
//! stop code, so re-loading the same artifact fails with a constraint
//! violation, while `bus_routes` has no uniqueness constraint and accepts
//! duplicate rows. Each load runs in a single transaction committed after the
//! last insert, so a mid-load failure rolls back the whole run.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, params_from_iter, types};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{OrderedRecord, ROUTE_COLUMNS, STOP_COLUMNS, StopServices};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS bus_stops (
    bus_stop_code TEXT PRIMARY KEY,
    road_name     TEXT,
    description   TEXT,
    latitude      REAL,
    longitude     REAL
);
CREATE TABLE IF NOT EXISTS bus_routes (
    service_no    TEXT,
    operator      TEXT,
    direction     INTEGER,
    stop_sequence INTEGER,
    bus_stop_code TEXT,
    distance      REAL,
    wd_first_bus  TEXT,
    wd_last_bus   TEXT,
    sat_first_bus TEXT,
    sat_last_bus  TEXT,
    sun_first_bus TEXT,
    sun_last_bus  TEXT
);
";

/// SQLite-backed relational store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert stop records in artifact order. Returns the row count.
    pub fn load_stops(&mut self, records: &[Value]) -> Result<usize> {
        self.load_positional("bus_stops", STOP_COLUMNS.len(), records)
    }

    /// Insert route records in artifact order. Returns the row count.
    pub fn load_routes(&mut self, records: &[Value]) -> Result<usize> {
        self.load_positional("bus_routes", ROUTE_COLUMNS.len(), records)
    }

    fn load_positional(&mut self, table: &str, width: usize, records: &[Value]) -> Result<usize> {
        let placeholders = vec!["?"; width].join(", ");
        let sql = format!("INSERT INTO {table} VALUES ({placeholders})");

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for record in records {
                let ordered = OrderedRecord::from_json(record, width)?;
                stmt.execute(params_from_iter(ordered.values().iter().map(to_sql_value)))?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Build the stop→services report, sorted ascending by stop code.
    ///
    /// Route rows referencing a stop code with no matching stop row are
    /// ignored, as in the source. A duplicate stop code is a fatal integrity
    /// error.
    pub fn build_report(&self) -> Result<Vec<StopServices>> {
        let mut by_code: BTreeMap<String, StopServices> = BTreeMap::new();

        let mut stmt = self.conn.prepare(
            "SELECT bus_stop_code, road_name, description, latitude, longitude FROM bus_stops",
        )?;
        let stops = stmt.query_map([], |row| {
            Ok(StopServices {
                code: row.get(0)?,
                road_name: row.get(1)?,
                description: row.get(2)?,
                latitude: row.get(3)?,
                longitude: row.get(4)?,
                services: Vec::new(),
            })
        })?;
        for stop in stops {
            let stop = stop?;
            let code = stop.code.clone();
            if by_code.insert(code.clone(), stop).is_some() {
                return Err(AppError::integrity(format!("duplicate stop code {code}")));
            }
        }

        // One grouped pass over the routes instead of one query per stop.
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT bus_stop_code, service_no FROM bus_routes \
             ORDER BY bus_stop_code, service_no",
        )?;
        let services = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for pair in services {
            let (code, service_no) = pair?;
            if let Some(entry) = by_code.get_mut(&code) {
                entry.services.push(service_no);
            }
        }

        Ok(by_code.into_values().collect())
    }
}

/// Map a JSON scalar to a SQLite value for positional binding.
fn to_sql_value(value: &Value) -> types::Value {
    match value {
        Value::Null => types::Value::Null,
        Value::Bool(b) => types::Value::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => types::Value::Integer(i),
            None => types::Value::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => types::Value::Text(s.clone()),
        // Arrays/objects do not occur in DataMall records; store as JSON text
        other => types::Value::Text(other.to_string()),
    }
}

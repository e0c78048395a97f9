// src/storage/checkpoint.rs

//! Checkpoint file writing and aggregation.
//!
//! Each fetched page is appended as one line: a zero-padded offset, the
//! `": "` separator, and the page's records as a JSON array. The writer keeps
//! one handle open for the whole pagination run and flushes after every line,
//! so a crash mid-run leaves a valid prefix of complete lines behind.
//!
//! Offsets are formatted `{:04}` by convention but never truncated; the
//! parser splits at the first `": "` rather than assuming a fixed prefix
//! width, so offsets of five or more digits round-trip unchanged.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Append-only writer for the checkpoint file.
///
/// Owned by the pagination loop: created when the loop starts, dropped on
/// every exit path. Creating the writer truncates any previous checkpoint,
/// matching the source behaviour of restarting at offset 0.
pub struct CheckpointWriter {
    file: File,
}

impl CheckpointWriter {
    /// Create (truncate) the checkpoint file at `path`.
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path).await?;
        Ok(Self { file })
    }

    /// Append one page as a complete line.
    pub async fn append(&mut self, offset: u64, records: &[Value]) -> Result<()> {
        let line = format!("{:04}: {}\n", offset, serde_json::to_string(records)?);
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        Ok(())
    }
}

/// Read a checkpoint file and concatenate all page records in file order.
///
/// File order equals fetch order, so the result is the full logical
/// collection. Any malformed line makes the whole checkpoint corrupt; no
/// partial result is returned.
pub async fn aggregate(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(path).await?;

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let (prefix, body) = line
            .split_once(": ")
            .ok_or_else(|| AppError::checkpoint(line_no, "missing offset separator"))?;
        prefix
            .parse::<u64>()
            .map_err(|e| AppError::checkpoint(line_no, format!("bad offset {prefix:?}: {e}")))?;
        let page: Vec<Value> = serde_json::from_str(body)
            .map_err(|e| AppError::checkpoint(line_no, e))?;
        records.extend(page);
    }
    Ok(records)
}

/// Replace the checkpoint file with the final artifact: a single JSON array
/// of all records, no offset prefixes.
///
/// Written to a temporary sibling path and renamed into place, so no reader
/// ever observes a half-written artifact.
pub async fn persist(path: impl AsRef<Path>, records: &[Value]) -> Result<()> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let bytes = serde_json::to_vec(records)?;

    let tmp = path.with_extension("tmp");
    let mut file = File::create(&tmp).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, &path).await?;
    Ok(())
}

/// Load a final artifact file back into memory.
pub async fn read_artifact(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn page(codes: &[&str]) -> Vec<Value> {
        codes.iter().map(|c| json!({"BusStopCode": c})).collect()
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_page() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bus_stops.json");

        let mut writer = CheckpointWriter::create(&path).await.unwrap();
        writer.append(0, &page(&["A", "B", "C"])).await.unwrap();
        writer.append(3, &page(&["D"])).await.unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0000: "));
        assert!(lines[1].starts_with("0003: "));
    }

    #[tokio::test]
    async fn test_aggregate_concatenates_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bus_stops.json");

        let mut writer = CheckpointWriter::create(&path).await.unwrap();
        writer.append(0, &page(&["A", "B", "C"])).await.unwrap();
        writer
            .append(3, &page(&["D", "E", "F", "G", "H"]))
            .await
            .unwrap();
        drop(writer);

        let records = aggregate(&path).await.unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0]["BusStopCode"], "A");
        assert_eq!(records[7]["BusStopCode"], "H");
    }

    #[tokio::test]
    async fn test_wide_offset_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checkpoint.json");

        let mut writer = CheckpointWriter::create(&path).await.unwrap();
        writer.append(123456, &page(&["X"])).await.unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("123456: "));
        let records = aggregate(&path).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_line_reports_line_number() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checkpoint.json");
        std::fs::write(&path, "0000: [{\"a\":1}]\nnot a checkpoint line\n").unwrap();

        let err = aggregate(&path).await.unwrap_err();
        match err {
            AppError::Checkpoint { line, .. } => assert_eq!(line, 2),
            other => panic!("expected checkpoint error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_json_body_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checkpoint.json");
        std::fs::write(&path, "0000: [{\"a\":1}\n").unwrap();

        assert!(aggregate(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_persist_replaces_checkpoint_with_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bus_stops.json");

        let mut writer = CheckpointWriter::create(&path).await.unwrap();
        writer.append(0, &page(&["A", "B"])).await.unwrap();
        drop(writer);

        let records = aggregate(&path).await.unwrap();
        persist(&path, &records).await.unwrap();

        let reloaded = read_artifact(&path).await.unwrap();
        assert_eq!(reloaded, records);
        assert!(!tmp.path().join("bus_stops.tmp").exists());
    }

    #[tokio::test]
    async fn test_create_truncates_previous_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checkpoint.json");
        std::fs::write(&path, "0000: [1,2,3]\n").unwrap();

        let writer = CheckpointWriter::create(&path).await.unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}

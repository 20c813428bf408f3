//! Filesystem input and output.
//!
//! Handles the files around an analysis run:
//! - Provider match dumps (JSONL, one fixture per line)
//! - Normalized match records (JSONL)
//! - Analysis reports (JSON)

pub mod jsonl;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::normalize::NormalizeError;

pub use jsonl::{read_normalized_matches, read_provider_matches, JsonlReader, JsonlWriter};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Write a value as pretty JSON, replacing the file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("team.json");

        write_json(&path, &serde_json::json!({"tier": "full"})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["tier"], "full");
    }
}

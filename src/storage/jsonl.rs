//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one fixture. Line order is
//! preserved on read, since analysis depends on the caller's ordering.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::StorageError;
use crate::models::MatchRecord;
use crate::normalize::normalize_value;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Read all entities in file order. Unparseable lines are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Read provider rows and normalize them, keeping file order.
///
/// Rows that cannot be normalized (unplayed fixtures, missing ids) are
/// skipped with a warning.
pub fn read_provider_matches(path: PathBuf) -> Result<Vec<MatchRecord>, StorageError> {
    let rows = JsonlReader::<serde_json::Value>::new(path).read_all()?;
    let total = rows.len();

    let mut matches = Vec::with_capacity(total);
    for (idx, row) in rows.into_iter().enumerate() {
        match normalize_value(row) {
            Ok(record) => matches.push(record),
            Err(e) => warn!("Skipping provider row {}: {}", idx + 1, e),
        }
    }

    info!("Normalized {} of {} provider rows", matches.len(), total);
    Ok(matches)
}

/// Read already-normalized match records.
pub fn read_normalized_matches(path: PathBuf) -> Result<Vec<MatchRecord>, StorageError> {
    JsonlReader::<MatchRecord>::new(path).read_all()
}

//! The flat tabular artifacts: the plain-text name list, the station
//! coordinate table and the facility match table.
//!
//! Malformed rows are reported and skipped; they never abort a run.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::TableError;
use crate::models::StationRecord;

/// Rows that parsed, plus how many were skipped as malformed.
pub struct TableRead<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Non-empty trimmed lines, in file order.
pub fn read_name_list(path: &Path) -> Result<Vec<String>, TableError> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Read a headered CSV, skipping rows that fail to deserialize.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<TableRead<T>, TableError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut skipped = 0;
    for (index, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                // +2: one for the header, one for 1-based numbering.
                warn!("skipping malformed row {}: {}", index + 2, e);
                skipped += 1;
            }
        }
    }
    Ok(TableRead { rows, skipped })
}

/// Station table read with the uniqueness invariant enforced: a repeated
/// station name keeps its first occurrence and the rest count as skipped.
pub fn read_station_table(path: &Path) -> Result<TableRead<StationRecord>, TableError> {
    let read = read_table::<StationRecord>(path)?;
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(read.rows.len());
    let mut skipped = read.skipped;
    for row in read.rows {
        if seen.insert(row.name.clone()) {
            rows.push(row);
        } else {
            warn!("duplicate station {:?} ignored", row.name);
            skipped += 1;
        }
    }
    Ok(TableRead { rows, skipped })
}

/// Write a headered CSV.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

//! CSV ingestion
//!
//! Reads comma-separated statement exports into raw transaction records,
//! using the header row as field names. An optional column map renames
//! source headers to the canonical field names the normalizer looks for
//! (e.g. "Transaction Date" -> "date"), so one code path handles any bank's
//! export layout.

use csv::ReaderBuilder;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::normalize::RawRecord;

/// Parse CSV data into raw transaction records.
///
/// Each row becomes one record keyed by the (optionally remapped) headers.
/// Values are kept as strings; interpretation is the normalizer's job.
pub fn ingest_csv<R: Read>(
    reader: R,
    column_map: Option<&HashMap<String, String>>,
) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|header| match column_map {
            Some(map) => map.get(header).cloned().unwrap_or_else(|| header.to_string()),
            None => header.to_string(),
        })
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = RawRecord::new();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = row.get(i) {
                record.insert(header.clone(), Value::String(value.to_string()));
            }
        }
        records.push(record);
    }

    debug!("Ingested {} CSV records", records.len());
    Ok(records)
}

/// Read and ingest a CSV file from disk.
pub fn ingest_csv_path(
    path: &Path,
    column_map: Option<&HashMap<String, String>>,
) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    ingest_csv(file, column_map)
}

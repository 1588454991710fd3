//! Dataset reader — schema-aware parsing of the `;`-delimited adoption file.
//!
//! The whole file is parsed before any record is returned, so a bad row
//! anywhere aborts the load with no partial result.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::errors::AppError;
use crate::models::animal::{AnimalRecord, COLUMN_COUNT};

pub const DELIMITER: u8 = b';';
const UTF8_BOM: &str = "\u{feff}";

/// Reads and validates every row of the dataset at `path`.
pub fn load_records(path: &Path) -> Result<Vec<AnimalRecord>, AppError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::NotFound(format!("dataset file '{}' does not exist", path.display()))
        }
        _ => AppError::Io(e),
    })?;

    let content = String::from_utf8(bytes).map_err(|e| {
        AppError::Dataset(format!(
            "'{}' is not valid UTF-8 (byte {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })?;

    let records = parse_records(&content)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses header-less dataset content. Row numbers in errors are 1-based.
pub fn parse_records(content: &str) -> Result<Vec<AnimalRecord>, AppError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true) // column count is checked below with a clearer message
        .from_reader(content.as_bytes());

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let raw = result.map_err(|e| AppError::Dataset(format!("row {row}: {e}")))?;

        if raw.len() != COLUMN_COUNT {
            return Err(AppError::Dataset(format!(
                "row {row}: expected {COLUMN_COUNT} columns, found {}",
                raw.len()
            )));
        }

        let record: AnimalRecord = raw
            .deserialize(None)
            .map_err(|e| AppError::Dataset(format!("row {row}: {e}")))?;
        records.push(record);
    }

    Ok(records)
}

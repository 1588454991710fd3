use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::dataset::reader::DELIMITER;
use crate::errors::AppError;
use crate::models::animal::AnimalRecord;

/// Writes `records` in the dataset's own 18-column, header-less format.
pub fn export_records(path: &Path, records: &[AnimalRecord]) -> Result<(), AppError> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::Dataset(format!("cannot create '{}': {e}", path.display())))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::Dataset(format!("cannot write '{}': {e}", record.name)))?;
    }
    writer.flush()?;

    info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

//! Dataset walker — drives the biography generator over the first N records.
//!
//! Flow: load_records (all-or-nothing) → take(limit) → build request →
//!       generate → print request and biography.
//!
//! A row that fails to generate is printed with the error marker and the walk
//! moves on; only load failures abort the run.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::biography::{render_failure, BiographyGenerator, GenerationRequest};
use crate::dataset::load_records;
use crate::errors::AppError;
use crate::models::animal::AnimalRecord;

const SEPARATOR: &str =
    "------------------------------------------------------------";

/// Outcome of one walk.
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    /// Rows a biography was attempted for.
    pub processed: usize,
    /// Rows whose biography failed.
    pub failed: usize,
    /// The processed records, `final_biography` filled where generation succeeded.
    pub records: Vec<AnimalRecord>,
}

/// Loads `path` and writes a biography for each of the first `limit` records to `out`.
pub async fn walk<W: Write>(
    path: &Path,
    limit: usize,
    generator: &BiographyGenerator,
    out: &mut W,
) -> Result<WalkReport, AppError> {
    let records = load_records(path)?;
    let sample = limit.min(records.len());

    info!(
        "Generating biographies for {} of {} records in {}",
        sample,
        records.len(),
        path.display()
    );

    writeln!(out, "{SEPARATOR}")?;
    writeln!(
        out,
        "*** Generación de biografías ({}) para los primeros {} animales ***",
        generator.mode().label(),
        sample
    )?;

    let mut report = WalkReport::default();

    for mut record in records.into_iter().take(sample) {
        let (input, result) = match GenerationRequest::from_record(&record) {
            Ok(request) => {
                let wire = request.to_string();
                let result = generator.generate(&wire).await;
                (wire, result)
            }
            Err(e) => {
                warn!("Skipping generation for {}: {e}", record.name);
                (record.name.clone(), Err(e))
            }
        };

        let biography = match result {
            Ok(biography) => {
                record.final_biography = biography.clone();
                biography
            }
            Err(e) => {
                report.failed += 1;
                render_failure(&e)
            }
        };

        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "Datos de entrada (campos clave):\n{input}")?;
        writeln!(out, "\nBiografía generada:\n{biography}")?;

        report.processed += 1;
        report.records.push(record);
    }

    writeln!(out, "{SEPARATOR}")?;
    out.flush()?;

    info!(
        "Walk finished: {} processed, {} failed",
        report.processed, report.failed
    );
    Ok(report)
}

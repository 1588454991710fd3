// Adoption dataset: reading the `;`-delimited file, walking a sample of it
// through the biography generator, and writing records back out.

pub mod exporter;
pub mod reader;
pub mod walker;

pub use exporter::export_records;
pub use reader::load_records;
pub use walker::walk;

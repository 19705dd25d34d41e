pub mod processors;

use anyhow::Result;
use contracts::domain::a001_sales_record::aggregate::RawSalesRow;
use std::path::Path;

/// Counters for one import run
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Read and parse the raw sales export file.
/// Returns the raw rows plus read/skip counters.
pub fn import_sales_export(path: &Path, delimiter: u8) -> Result<(Vec<RawSalesRow>, ImportStats)> {
    if !path.exists() {
        anyhow::bail!("sales export not found at {}", path.display());
    }

    let text = std::fs::read_to_string(path)?;
    tracing::info!("Importing sales export: {}", path.display());

    processors::sales_export::process_sales_export_csv(&text, delimiter)
}

use anyhow::{Context, Result};
use contracts::projections::PivotSummaryEntry;
use std::path::Path;

/// Write the pivot summary listing (name, rows, columns per table)
pub fn write_summary(path: &Path, entries: &[PivotSummaryEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write summary to {}", path.display()))?;

    writer.write_record(["Pivot_Table", "Rows", "Columns"])?;
    for entry in entries {
        writer.write_record([
            entry.table.as_str(),
            &entry.rows.to_string(),
            &entry.columns.to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Wrote pivot summary ({} tables) to {}", entries.len(), path.display());
    Ok(())
}

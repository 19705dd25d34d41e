use anyhow::{Context, Result};
use contracts::projections::p903_staff_performance::dto::StaffPerformanceRow;
use std::path::Path;

pub const COLUMNS: usize = 4;

pub fn write(path: &Path, rows: &[StaffPerformanceRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write pivot to {}", path.display()))?;

    writer.write_record(["Staff_id", "Revenue", "Quantity", "Rank"])?;
    for row in rows {
        writer.write_record([
            row.staff_id.as_str(),
            &format!("{:.2}", row.revenue),
            &row.quantity.to_string(),
            &row.rank.to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote staff performance ({} rows) to {}",
        rows.len(),
        path.display()
    );
    Ok(())
}

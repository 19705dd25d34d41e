use anyhow::{Context, Result};
use contracts::projections::p902_monthly_trend::dto::MonthlyTrendRow;
use std::path::Path;

pub const COLUMNS: usize = 3;

pub fn write(path: &Path, rows: &[MonthlyTrendRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write pivot to {}", path.display()))?;

    writer.write_record(["Year_Month", "Revenue", "Quantity"])?;
    for row in rows {
        writer.write_record([
            row.year_month.as_str(),
            &format!("{:.2}", row.revenue),
            &row.quantity.to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Wrote monthly trend ({} rows) to {}", rows.len(), path.display());
    Ok(())
}

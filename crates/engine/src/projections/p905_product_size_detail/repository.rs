use anyhow::{Context, Result};
use contracts::projections::p905_product_size_detail::dto::ProductSizeDetailRow;
use std::path::Path;

pub const COLUMNS: usize = 4;

pub fn write(path: &Path, rows: &[ProductSizeDetailRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write pivot to {}", path.display()))?;

    writer.write_record(["Product_Name", "Size", "Revenue", "Quantity"])?;
    for row in rows {
        writer.write_record([
            row.product_name.as_str(),
            row.size.as_str(),
            &format!("{:.2}", row.revenue),
            &row.quantity.to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote product/size detail ({} rows) to {}",
        rows.len(),
        path.display()
    );
    Ok(())
}

use anyhow::{Context, Result};
use contracts::projections::p904_product_size::dto::ProductSizeRow;
use std::path::Path;

pub const COLUMNS: usize = 9;

pub fn write(path: &Path, rows: &[ProductSizeRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write pivot to {}", path.display()))?;

    writer.write_record([
        "Product_Name",
        "S_Quantity",
        "S_Revenue",
        "M_Quantity",
        "M_Revenue",
        "L_Quantity",
        "L_Revenue",
        "Total_Quantity",
        "Total_Revenue",
    ])?;
    for row in rows {
        writer.write_record([
            row.product_name.as_str(),
            &row.s_quantity.to_string(),
            &format!("{:.2}", row.s_revenue),
            &row.m_quantity.to_string(),
            &format!("{:.2}", row.m_revenue),
            &row.l_quantity.to_string(),
            &format!("{:.2}", row.l_revenue),
            &row.total_quantity.to_string(),
            &format!("{:.2}", row.total_revenue),
        ])?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote product/size pivot ({} rows) to {}",
        rows.len(),
        path.display()
    );
    Ok(())
}

use anyhow::{Context, Result};
use contracts::projections::p901_product_channel::dto::ProductChannelPivot;
use std::path::Path;

/// Write the pivot as a flat CSV with `<Channel>_Revenue` /
/// `<Channel>_Quantity` columns plus totals
pub fn write(path: &Path, pivot: &ProductChannelPivot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write pivot to {}", path.display()))?;

    let mut header = vec!["Product_Name".to_string()];
    for channel in &pivot.channel_names {
        header.push(format!("{}_Revenue", channel));
        header.push(format!("{}_Quantity", channel));
    }
    header.push("Total_Revenue".to_string());
    header.push("Total_Quantity".to_string());
    writer.write_record(&header)?;

    for row in &pivot.rows {
        let mut fields = vec![row.product_name.clone()];
        for channel in &pivot.channel_names {
            let cell = row.channels.get(channel).copied().unwrap_or_default();
            fields.push(format!("{:.2}", cell.revenue));
            fields.push(cell.quantity.to_string());
        }
        fields.push(format!("{:.2}", row.total_revenue));
        fields.push(row.total_quantity.to_string());
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote product/channel pivot ({} rows) to {}",
        pivot.rows.len(),
        path.display()
    );
    Ok(())
}

/// Number of CSV columns for the summary listing
pub fn column_count(pivot: &ProductChannelPivot) -> usize {
    1 + pivot.channel_names.len() * 2 + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::p901_product_channel::projection_builder;
    use chrono::NaiveDate;
    use contracts::domain::a001_sales_record::aggregate::SalesRecord;
    use contracts::enums::Size;

    #[test]
    fn test_flattened_headers() {
        let records = vec![SalesRecord {
            sale_id: "S1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            product_name: "Latte".to_string(),
            size: Size::M,
            order_channel: "Online".to_string(),
            staff_id: "NV01".to_string(),
            quantity: 1,
            unit_price: 100.0,
            revenue: 100.0,
            year_month: "2024-01".to_string(),
            quarter: "2024-Q1".to_string(),
        }];
        let pivot = projection_builder::build(&records);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product_channel.csv");
        write(&path, &pivot).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "Product_Name,Online_Revenue,Online_Quantity,Total_Revenue,Total_Quantity"
        );
        assert_eq!(column_count(&pivot), 5);
    }
}

use anyhow::{Context, Result};
use chrono::NaiveDate;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::enums::Size;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cleaned dataset not found at {0} (run the import step first)")]
    NotFound(PathBuf),
    #[error("cleaned dataset has unexpected header {found:?}, expected {expected:?}")]
    BadHeader {
        found: Vec<String>,
        expected: Vec<String>,
    },
}

/// Column order of cleaned_data.csv, comma-delimited
const HEADER: [&str; 11] = [
    "Sale_id",
    "Date",
    "Product_Name",
    "Size",
    "Order_Channel",
    "Staff_id",
    "Quantity",
    "Unit_Price",
    "Revenue",
    "Year_Month",
    "Quarter",
];

/// Persist the cleaned dataset
pub fn save_cleaned(path: &Path, records: &[SalesRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write cleaned dataset to {}", path.display()))?;

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.sale_id.as_str(),
            &record.date.format("%Y-%m-%d").to_string(),
            record.product_name.as_str(),
            record.size.as_str(),
            record.order_channel.as_str(),
            record.staff_id.as_str(),
            &record.quantity.to_string(),
            &format_amount(record.unit_price),
            &format_amount(record.revenue),
            record.year_month.as_str(),
            record.quarter.as_str(),
        ])?;
    }
    writer.flush()?;

    tracing::info!("Saved {} cleaned records to {}", records.len(), path.display());
    Ok(())
}

/// Load the cleaned dataset back, re-validating header and field types
pub fn load_cleaned(path: &Path) -> Result<Vec<SalesRecord>> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()).into());
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot read cleaned dataset from {}", path.display()))?;

    let found: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if found != HEADER {
        return Err(DatasetError::BadHeader {
            found,
            expected: HEADER.iter().map(|s| s.to_string()).collect(),
        }
        .into());
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let row = result.with_context(|| format!("bad CSV record at line {}", line))?;
        let field = |idx: usize| -> Result<&str> {
            row.get(idx)
                .ok_or_else(|| anyhow::anyhow!("missing field {} at line {}", HEADER[idx], line))
        };

        let size_str = field(3)?;
        let size = Size::parse(size_str)
            .ok_or_else(|| anyhow::anyhow!("bad size {:?} at line {}", size_str, line))?;

        records.push(SalesRecord {
            sale_id: field(0)?.to_string(),
            date: NaiveDate::parse_from_str(field(1)?, "%Y-%m-%d")
                .with_context(|| format!("bad date at line {}", line))?,
            product_name: field(2)?.to_string(),
            size,
            order_channel: field(4)?.to_string(),
            staff_id: field(5)?.to_string(),
            quantity: field(6)?
                .parse()
                .with_context(|| format!("bad quantity at line {}", line))?,
            unit_price: field(7)?
                .parse()
                .with_context(|| format!("bad unit price at line {}", line))?,
            revenue: field(8)?
                .parse()
                .with_context(|| format!("bad revenue at line {}", line))?,
            year_month: field(9)?.to_string(),
            quarter: field(10)?.to_string(),
        });
    }

    tracing::info!("Loaded {} cleaned records from {}", records.len(), path.display());
    Ok(records)
}

/// Amounts round-trip with two decimals; trailing zeros are harmless
fn format_amount(v: f64) -> String {
    format!("{:.2}", v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str) -> SalesRecord {
        SalesRecord {
            sale_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            product_name: "Latte".to_string(),
            size: Size::M,
            order_channel: "Online".to_string(),
            staff_id: "NV01".to_string(),
            quantity: 2,
            unit_price: 45000.0,
            revenue: 90000.0,
            year_month: "2024-03".to_string(),
            quarter: "2024-Q1".to_string(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_data.csv");

        let records = vec![record("S001"), record("S002")];
        save_cleaned(&path, &records).unwrap();

        let loaded = load_cleaned(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].sale_id, "S001");
        assert_eq!(loaded[0].date, records[0].date);
        assert_eq!(loaded[0].size, Size::M);
        assert_eq!(loaded[0].revenue, 90000.0);
        assert_eq!(loaded[1].quarter, "2024-Q1");
    }

    #[test]
    fn test_load_missing_file_is_dataset_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_cleaned(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.downcast_ref::<DatasetError>().is_some());
    }

    #[test]
    fn test_load_rejects_foreign_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.csv");
        std::fs::write(&path, "a,b,c\n1,2,3\n").unwrap();
        let err = load_cleaned(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::BadHeader { .. })
        ));
    }
}

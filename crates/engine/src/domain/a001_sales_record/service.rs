use chrono::{Datelike, NaiveDate};
use contracts::domain::a001_sales_record::aggregate::{CleaningReport, RawSalesRow, SalesRecord};
use contracts::enums::Size;
use std::collections::{HashMap, HashSet};

/// Clean raw export rows into typed sales records.
///
/// Rules, in order per row:
/// - unparseable date or missing product name drops the row
/// - missing sale id gets a synthetic key built from immutable fields
/// - duplicate sale ids keep the first occurrence
/// - missing size is imputed with the dataset's modal size (fallback M)
/// - missing quantity becomes 1; non-positive quantities drop the row
/// - missing revenue is recomputed from quantity * unit price; missing
///   unit price is recovered from revenue / quantity; rows where neither
///   amount can be recovered are dropped
pub fn clean(rows: Vec<RawSalesRow>) -> (Vec<SalesRecord>, CleaningReport) {
    let mut report = CleaningReport {
        rows_in: rows.len(),
        ..Default::default()
    };

    let modal_size = modal_size(&rows);

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let date = match row.date.as_deref().and_then(parse_export_date) {
            Some(d) => d,
            None => {
                tracing::warn!(
                    "Dropping row at line {}: missing or unparseable date {:?}",
                    row.source_line,
                    row.date
                );
                report.dropped_missing_date += 1;
                continue;
            }
        };

        let product_name = match row.product_name.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => {
                tracing::warn!(
                    "Dropping row at line {}: missing product name",
                    row.source_line
                );
                report.dropped_missing_product += 1;
                continue;
            }
        };

        let quantity = match row.quantity {
            Some(q) if q > 0 => q as u32,
            Some(_) => {
                tracing::warn!(
                    "Dropping row at line {}: non-positive quantity {:?}",
                    row.source_line,
                    row.quantity
                );
                report.dropped_nonpositive_quantity += 1;
                continue;
            }
            None => {
                report.imputed_quantity += 1;
                1
            }
        };

        // Recover the amount pair; unit price and revenue must end up > 0
        let unit_price = row.unit_price.filter(|p| *p > 0.0);
        let revenue = row.revenue.filter(|r| *r > 0.0);
        let (unit_price, revenue) = match (unit_price, revenue) {
            (Some(p), Some(r)) => (p, r),
            (Some(p), None) => {
                report.recomputed_revenue += 1;
                (p, p * quantity as f64)
            }
            (None, Some(r)) => {
                report.recovered_unit_price += 1;
                (r / quantity as f64, r)
            }
            (None, None) => {
                tracing::warn!(
                    "Dropping row at line {}: neither unit price nor revenue present",
                    row.source_line
                );
                report.dropped_unrecoverable_amount += 1;
                continue;
            }
        };

        // record_key is built from immutable fields so it stays stable
        // across re-imports of the same export
        let sale_id = match row.sale_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                report.synthetic_ids += 1;
                format!(
                    "SYNTH_{}_{}_{}",
                    date.format("%Y%m%d"),
                    product_name.replace(' ', "_"),
                    row.source_line
                )
            }
        };

        if !seen_ids.insert(sale_id.clone()) {
            tracing::warn!(
                "Dropping row at line {}: duplicate sale id {}",
                row.source_line,
                sale_id
            );
            report.duplicates_removed += 1;
            continue;
        }

        let size = match row.size.as_deref().and_then(Size::parse) {
            Some(s) => s,
            None => {
                report.imputed_size += 1;
                modal_size
            }
        };

        records.push(SalesRecord {
            sale_id,
            date,
            product_name,
            size,
            order_channel: normalize_channel(row.order_channel.as_deref().unwrap_or("Unknown")),
            staff_id: row
                .staff_id
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("UNKNOWN")
                .to_string(),
            quantity,
            unit_price,
            revenue,
            year_month: date.format("%Y-%m").to_string(),
            quarter: format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
        });
    }

    report.rows_out = records.len();

    tracing::info!(
        "Cleaning complete: {} in, {} out, {} dropped ({} dup), {} size / {} qty imputed, {} revenue recomputed",
        report.rows_in,
        report.rows_out,
        report.dropped(),
        report.duplicates_removed,
        report.imputed_size,
        report.imputed_quantity,
        report.recomputed_revenue
    );

    (records, report)
}

/// Most frequent parseable size across the dataset, M when none parse
fn modal_size(rows: &[RawSalesRow]) -> Size {
    let mut counts: HashMap<Size, usize> = HashMap::new();
    for row in rows {
        if let Some(size) = row.size.as_deref().and_then(Size::parse) {
            *counts.entry(size).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        // Stable tie-break: S < M < L
        .max_by_key(|(size, count)| (*count, std::cmp::Reverse(*size)))
        .map(|(size, _)| size)
        .unwrap_or(Size::M)
}

/// Parse an export date cell. Accepts ISO and day-first variants, with or
/// without a trailing time component.
fn parse_export_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().split(['T', ' ']).next()?;

    const FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Trim and normalize casing: first letter of each word upper, rest lower
fn normalize_channel(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }
    trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(line: usize) -> RawSalesRow {
        RawSalesRow {
            sale_id: Some(format!("S{:03}", line)),
            date: Some("2024-03-15".to_string()),
            product_name: Some("Latte".to_string()),
            size: Some("M".to_string()),
            order_channel: Some("online".to_string()),
            staff_id: Some("NV01".to_string()),
            quantity: Some(2),
            unit_price: Some(45000.0),
            revenue: Some(90000.0),
            source_line: line,
        }
    }

    #[test]
    fn test_clean_happy_path_and_derived_fields() {
        let (records, report) = clean(vec![raw(2)]);
        assert_eq!(report.rows_out, 1);
        let r = &records[0];
        assert_eq!(r.year_month, "2024-03");
        assert_eq!(r.quarter, "2024-Q1");
        assert_eq!(r.order_channel, "Online");
    }

    #[test]
    fn test_quarter_derivation() {
        for (month, quarter) in [(1, "Q1"), (4, "Q2"), (9, "Q3"), (12, "Q4")] {
            let mut row = raw(2);
            row.date = Some(format!("2024-{:02}-01", month));
            let (records, _) = clean(vec![row]);
            assert_eq!(records[0].quarter, format!("2024-{}", quarter));
        }
    }

    #[test]
    fn test_missing_date_or_product_drops_row() {
        let mut no_date = raw(2);
        no_date.date = Some("not a date".to_string());
        let mut no_product = raw(3);
        no_product.product_name = None;

        let (records, report) = clean(vec![no_date, no_product]);
        assert!(records.is_empty());
        assert_eq!(report.dropped_missing_date, 1);
        assert_eq!(report.dropped_missing_product, 1);
    }

    #[test]
    fn test_day_first_dates_parse() {
        let mut row = raw(2);
        row.date = Some("15/03/2024 10:30".to_string());
        let (records, _) = clean(vec![row]);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_size_imputed_with_mode() {
        let mut a = raw(2);
        a.size = Some("L".to_string());
        let mut b = raw(3);
        b.size = Some("L".to_string());
        let mut c = raw(4);
        c.size = None;

        let (records, report) = clean(vec![a, b, c]);
        assert_eq!(report.imputed_size, 1);
        assert_eq!(records[2].size, Size::L);
    }

    #[test]
    fn test_quantity_imputed_as_one() {
        let mut row = raw(2);
        row.quantity = None;
        row.revenue = Some(45000.0);
        let (records, report) = clean(vec![row]);
        assert_eq!(report.imputed_quantity, 1);
        assert_eq!(records[0].quantity, 1);
    }

    #[test]
    fn test_revenue_recomputed_from_price() {
        let mut row = raw(2);
        row.revenue = None;
        let (records, report) = clean(vec![row]);
        assert_eq!(report.recomputed_revenue, 1);
        assert_eq!(records[0].revenue, 90000.0);
    }

    #[test]
    fn test_unit_price_recovered_from_revenue() {
        let mut row = raw(2);
        row.unit_price = None;
        let (records, report) = clean(vec![row]);
        assert_eq!(report.recovered_unit_price, 1);
        assert_eq!(records[0].unit_price, 45000.0);
    }

    #[test]
    fn test_unrecoverable_amounts_drop_row() {
        let mut row = raw(2);
        row.unit_price = None;
        row.revenue = None;
        let (records, report) = clean(vec![row]);
        assert!(records.is_empty());
        assert_eq!(report.dropped_unrecoverable_amount, 1);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let mut first = raw(2);
        first.revenue = Some(90000.0);
        let mut dup = raw(3);
        dup.sale_id = first.sale_id.clone();
        dup.revenue = Some(1.0);

        let (records, report) = clean(vec![first, dup]);
        assert_eq!(records.len(), 1);
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(records[0].revenue, 90000.0);
    }

    #[test]
    fn test_synthetic_id_is_stable() {
        let mut row = raw(7);
        row.sale_id = None;
        let (records, report) = clean(vec![row.clone()]);
        assert_eq!(report.synthetic_ids, 1);
        assert_eq!(records[0].sale_id, "SYNTH_20240315_Latte_7");

        // Same input, same key
        let (again, _) = clean(vec![row]);
        assert_eq!(again[0].sale_id, records[0].sale_id);
    }
}

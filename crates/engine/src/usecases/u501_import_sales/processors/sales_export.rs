use anyhow::Result;
use contracts::domain::a001_sales_record::aggregate::RawSalesRow;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::usecases::u501_import_sales::ImportStats;

/// Canonical field names recognized in the export header.
/// Keys are normalized header variants seen across POS exports.
static HEADER_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sale_id", "sale_id"),
        ("saleid", "sale_id"),
        ("sale_no", "sale_id"),
        ("order_id", "sale_id"),
        ("id", "sale_id"),
        ("date", "date"),
        ("sale_date", "date"),
        ("order_date", "date"),
        ("datetime", "date"),
        ("product_name", "product_name"),
        ("productname", "product_name"),
        ("product", "product_name"),
        ("item", "product_name"),
        ("item_name", "product_name"),
        ("size", "size"),
        ("cup_size", "size"),
        ("product_size", "size"),
        ("order_channel", "order_channel"),
        ("orderchannel", "order_channel"),
        ("channel", "order_channel"),
        ("sales_channel", "order_channel"),
        ("saleschannel", "order_channel"),
        ("staff_id", "staff_id"),
        ("staffid", "staff_id"),
        ("staff", "staff_id"),
        ("employee_id", "staff_id"),
        ("employee", "staff_id"),
        ("quantity", "quantity"),
        ("qty", "quantity"),
        ("count", "quantity"),
        ("units", "quantity"),
        ("unit_price", "unit_price"),
        ("unitprice", "unit_price"),
        ("price", "unit_price"),
        ("selling_price", "unit_price"),
        ("actual_selling_price", "unit_price"),
        ("revenue", "revenue"),
        ("amount", "revenue"),
        ("total", "revenue"),
        ("total_amount", "revenue"),
        ("sales", "revenue"),
        ("turnover", "revenue"),
    ])
});

/// Parse the semicolon-delimited sales export text.
/// Malformed records are skipped and counted, never abort the import.
pub fn process_sales_export_csv(
    csv_text: &str,
    delimiter: u8,
) -> Result<(Vec<RawSalesRow>, ImportStats)> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            anyhow::bail!("Failed to read CSV headers: {}", e);
        }
    };

    // An empty export (no header line at all) is zero rows, not an error
    if headers.iter().all(|h| h.trim().is_empty()) {
        tracing::warn!("Sales export is empty, nothing to import");
        return Ok((Vec::new(), ImportStats::default()));
    }

    // Canonical field -> column index; first matching header wins
    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(&canonical) = HEADER_ALIASES.get(normalize_header(header).as_str()) {
            columns.entry(canonical).or_insert(i);
        }
    }

    tracing::info!(
        "Sales export headers: {:?} -> recognized {} of {} columns",
        headers.iter().collect::<Vec<_>>(),
        columns.len(),
        headers.len()
    );

    if !columns.contains_key("date") && !columns.contains_key("product_name") {
        anyhow::bail!(
            "export header not recognized: no date or product column found in {:?}",
            headers.iter().collect::<Vec<_>>()
        );
    }

    let mut rows = Vec::new();
    let mut stats = ImportStats::default();

    for (record_index, result) in reader.records().enumerate() {
        // Header occupies line 1
        let source_line = record_index + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record at line {}: {}", source_line, e);
                stats.rows_skipped += 1;
                continue;
            }
        };

        // Field by canonical name, None if the cell is absent or empty
        let get_field = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        // A record made of empty cells only (trailing separators etc.)
        if record.iter().all(|c| c.trim().is_empty()) {
            stats.rows_skipped += 1;
            continue;
        }

        rows.push(RawSalesRow {
            sale_id: get_field("sale_id"),
            date: get_field("date"),
            product_name: get_field("product_name"),
            size: get_field("size"),
            order_channel: get_field("order_channel"),
            staff_id: get_field("staff_id"),
            quantity: get_field("quantity").and_then(|v| parse_quantity(&v)),
            unit_price: get_field("unit_price").and_then(|v| parse_decimal(&v)),
            revenue: get_field("revenue").and_then(|v| parse_decimal(&v)),
            source_line,
        });
        stats.rows_read += 1;

        if stats.rows_read % 1000 == 0 {
            tracing::info!("Sales export progress: {} records read", stats.rows_read);
        }
    }

    tracing::info!(
        "Sales export parsing complete: {} read, {} skipped",
        stats.rows_read,
        stats.rows_skipped
    );

    Ok((rows, stats))
}

/// Lowercase a header and collapse separators to underscores
fn normalize_header(h: &str) -> String {
    let mut out = String::with_capacity(h.len());
    for ch in h.trim().chars() {
        match ch {
            ' ' | '-' | '.' | '/' => {
                if !out.ends_with('_') {
                    out.push('_');
                }
            }
            c if c.is_alphanumeric() || c == '_' => {
                for lc in c.to_lowercase() {
                    out.push(lc);
                }
            }
            _ => {}
        }
    }
    out.trim_matches('_').to_string()
}

/// Parse a number that may use comma decimal separators and/or
/// thousands separators ("1.234,56", "1,234.56", "1234,56")
fn parse_decimal(s: &str) -> Option<f64> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    let normalized = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if dot > comma {
                // comma groups thousands, dot is decimal
                compact.replace(',', "")
            } else {
                // dot groups thousands, comma is decimal
                compact.replace('.', "").replace(',', ".")
            }
        }
        (None, Some(_)) => compact.replace(',', "."),
        _ => compact,
    };

    normalized.parse::<f64>().ok()
}

/// Quantities occasionally arrive as "2.0"; round to the nearest integer
fn parse_quantity(s: &str) -> Option<i64> {
    if let Ok(v) = s.trim().parse::<i64>() {
        return Some(v);
    }
    parse_decimal(s).map(|v| v.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{FEFF}Sale ID;Date;Product Name;Size;Order Channel;Staff ID;Quantity;Actual Selling Price;Revenue\n\
        S001;2024-01-15;Latte;M;Online;NV01;2;45000;90000\n\
        S002;15/01/2024;Cappuccino;L;Offline;NV02;1;55.000,50;55000,5\n\
        ;;;;;;;;\n\
        S003;2024-02-01;Americano;;Online;NV01;;40000;\n";

    #[test]
    fn test_headers_and_rows_parse() {
        let (rows, stats) = process_sales_export_csv(SAMPLE, b';').unwrap();
        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_skipped, 1); // the all-empty line

        assert_eq!(rows[0].sale_id.as_deref(), Some("S001"));
        assert_eq!(rows[0].product_name.as_deref(), Some("Latte"));
        assert_eq!(rows[0].quantity, Some(2));
        assert_eq!(rows[0].unit_price, Some(45000.0));
        assert_eq!(rows[0].revenue, Some(90000.0));
        assert_eq!(rows[0].source_line, 2);
    }

    #[test]
    fn test_comma_decimal_and_thousands() {
        let (rows, _) = process_sales_export_csv(SAMPLE, b';').unwrap();
        assert_eq!(rows[1].unit_price, Some(55000.5));
        assert_eq!(rows[1].revenue, Some(55000.5));
    }

    #[test]
    fn test_empty_cells_are_none() {
        let (rows, _) = process_sales_export_csv(SAMPLE, b';').unwrap();
        assert_eq!(rows[2].size, None);
        assert_eq!(rows[2].quantity, None);
        assert_eq!(rows[2].revenue, None);
    }

    #[test]
    fn test_empty_input_yields_no_rows_and_no_error() {
        let (rows, stats) = process_sales_export_csv("", b';').unwrap();
        assert!(rows.is_empty());
        assert_eq!(stats.rows_read, 0);
        assert_eq!(stats.rows_skipped, 0);

        // BOM-only input is equally empty
        let (rows, _) = process_sales_export_csv("\u{FEFF}", b';').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_headers_only_yields_no_rows() {
        let text = "Sale_id;Date;Product_Name;Revenue\n";
        let (rows, stats) = process_sales_export_csv(text, b';').unwrap();
        assert!(rows.is_empty());
        assert_eq!(stats.rows_read, 0);
    }

    #[test]
    fn test_unrecognized_header_fails() {
        let text = "foo;bar;baz\n1;2;3\n";
        assert!(process_sales_export_csv(text, b';').is_err());
    }

    #[test]
    fn test_parse_decimal_variants() {
        assert_eq!(parse_decimal("45000"), Some(45000.0));
        assert_eq!(parse_decimal("45000,5"), Some(45000.5));
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("1,234.56"), Some(1234.56));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Sale ID"), "sale_id");
        assert_eq!(normalize_header("  Order-Channel "), "order_channel");
        assert_eq!(normalize_header("Actual Selling Price"), "actual_selling_price");
    }
}

use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::projections::p903_staff_performance::dto::StaffPerformanceRow;
use std::collections::HashMap;

/// Per-staff revenue and quantity, sorted by revenue descending,
/// ranked 1..n
pub fn build(records: &[SalesRecord]) -> Vec<StaffPerformanceRow> {
    let mut totals: HashMap<String, (f64, u64)> = HashMap::new();

    for record in records {
        let entry = totals.entry(record.staff_id.clone()).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.quantity as u64;
    }

    let mut rows: Vec<StaffPerformanceRow> = totals
        .into_iter()
        .map(|(staff_id, (revenue, quantity))| StaffPerformanceRow {
            staff_id,
            revenue,
            quantity,
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.staff_id.cmp(&b.staff_id))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::enums::Size;

    fn record(staff: &str, revenue: f64) -> SalesRecord {
        SalesRecord {
            sale_id: format!("{}-{}", staff, revenue),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            product_name: "Latte".to_string(),
            size: Size::M,
            order_channel: "Online".to_string(),
            staff_id: staff.to_string(),
            quantity: 1,
            unit_price: revenue,
            revenue,
            year_month: "2024-01".to_string(),
            quarter: "2024-Q1".to_string(),
        }
    }

    #[test]
    fn test_ranked_by_revenue_desc() {
        let records = vec![
            record("NV02", 50.0),
            record("NV01", 100.0),
            record("NV02", 30.0),
            record("NV03", 120.0),
        ];

        let rows = build(&records);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].staff_id, "NV03");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].staff_id, "NV01");
        assert_eq!(rows[2].staff_id, "NV02");
        assert_eq!(rows[2].revenue, 80.0);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_tied_revenue_breaks_by_staff_id() {
        let records = vec![record("B", 10.0), record("A", 10.0)];
        let rows = build(&records);
        assert_eq!(rows[0].staff_id, "A");
        assert_eq!(rows[1].staff_id, "B");
    }
}

use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::projections::p902_monthly_trend::dto::MonthlyTrendRow;
use std::collections::BTreeMap;

/// Revenue and quantity per "YYYY-MM", sorted by month ascending.
/// The lexicographic order of the keys is the chronological order.
pub fn build(records: &[SalesRecord]) -> Vec<MonthlyTrendRow> {
    let mut months: BTreeMap<String, (f64, u64)> = BTreeMap::new();

    for record in records {
        let entry = months.entry(record.year_month.clone()).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.quantity as u64;
    }

    months
        .into_iter()
        .map(|(year_month, (revenue, quantity))| MonthlyTrendRow {
            year_month,
            revenue,
            quantity,
        })
        .collect()
}

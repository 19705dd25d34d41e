use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::enums::Size;
use contracts::projections::p905_product_size_detail::dto::ProductSizeDetailRow;
use std::collections::HashMap;

/// One row per (product, size) pair actually observed,
/// sorted by product ascending then revenue descending
pub fn build(records: &[SalesRecord]) -> Vec<ProductSizeDetailRow> {
    let mut pairs: HashMap<(String, Size), (f64, u64)> = HashMap::new();

    for record in records {
        let entry = pairs
            .entry((record.product_name.clone(), record.size))
            .or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.quantity as u64;
    }

    let mut rows: Vec<ProductSizeDetailRow> = pairs
        .into_iter()
        .map(|((product_name, size), (revenue, quantity))| ProductSizeDetailRow {
            product_name,
            size,
            revenue,
            quantity,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.product_name.cmp(&b.product_name).then_with(|| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.size.cmp(&b.size))
        })
    });

    rows
}

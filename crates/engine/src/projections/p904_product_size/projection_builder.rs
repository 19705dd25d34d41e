use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::enums::Size;
use contracts::projections::p904_product_size::dto::ProductSizeRow;
use std::collections::HashMap;

/// Product-by-size pivot with fixed S/M/L columns (always present,
/// zero-filled), sorted by total revenue descending
pub fn build(records: &[SalesRecord]) -> Vec<ProductSizeRow> {
    let mut by_product: HashMap<String, ProductSizeRow> = HashMap::new();

    for record in records {
        let row = by_product
            .entry(record.product_name.clone())
            .or_insert_with(|| ProductSizeRow {
                product_name: record.product_name.clone(),
                ..Default::default()
            });

        let quantity = record.quantity as u64;
        match record.size {
            Size::S => {
                row.s_quantity += quantity;
                row.s_revenue += record.revenue;
            }
            Size::M => {
                row.m_quantity += quantity;
                row.m_revenue += record.revenue;
            }
            Size::L => {
                row.l_quantity += quantity;
                row.l_revenue += record.revenue;
            }
        }
        row.total_quantity += quantity;
        row.total_revenue += record.revenue;
    }

    let mut rows: Vec<ProductSizeRow> = by_product.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(product: &str, size: Size, revenue: f64, quantity: u32) -> SalesRecord {
        SalesRecord {
            sale_id: format!("{}-{}-{}", product, size, revenue),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            product_name: product.to_string(),
            size,
            order_channel: "Online".to_string(),
            staff_id: "NV01".to_string(),
            quantity,
            unit_price: revenue / quantity as f64,
            revenue,
            year_month: "2024-01".to_string(),
            quarter: "2024-Q1".to_string(),
        }
    }

    #[test]
    fn test_fixed_size_columns_zero_filled() {
        let records = vec![
            record("Latte", Size::M, 100.0, 2),
            record("Latte", Size::L, 60.0, 1),
            record("Espresso", Size::S, 40.0, 1),
        ];

        let rows = build(&records);
        assert_eq!(rows[0].product_name, "Latte");
        assert_eq!(rows[0].s_quantity, 0);
        assert_eq!(rows[0].s_revenue, 0.0);
        assert_eq!(rows[0].m_revenue, 100.0);
        assert_eq!(rows[0].l_revenue, 60.0);
        assert_eq!(rows[0].total_revenue, 160.0);
        assert_eq!(rows[0].total_quantity, 3);

        assert_eq!(rows[1].product_name, "Espresso");
        assert_eq!(rows[1].m_quantity, 0);
        assert_eq!(rows[1].l_quantity, 0);
    }
}

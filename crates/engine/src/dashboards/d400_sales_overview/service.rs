use anyhow::Result;
use contracts::dashboards::d400_sales_overview::dto::{
    ChannelBreakdown, OverviewTotals, SalesOverview, TopEntry,
};
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Build the dataset-wide snapshot for the dashboard home screen
pub fn build_overview(
    records: &[SalesRecord],
    top_products_n: usize,
    top_staff_n: usize,
) -> Result<SalesOverview> {
    if records.is_empty() {
        anyhow::bail!("cannot build overview: no cleaned records");
    }

    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_quantity: u64 = records.iter().map(|r| r.quantity as u64).sum();

    let order_ids: HashSet<&str> = records.iter().map(|r| r.sale_id.as_str()).collect();
    let order_count = order_ids.len();

    let products: HashSet<&str> = records.iter().map(|r| r.product_name.as_str()).collect();

    let date_from = records.iter().map(|r| r.date).min().unwrap_or_default();
    let date_to = records.iter().map(|r| r.date).max().unwrap_or_default();

    // === CHANNEL BREAKDOWN ===
    let mut channel_totals: HashMap<String, (f64, u64)> = HashMap::new();
    let mut channel_orders: HashMap<String, HashSet<&str>> = HashMap::new();
    for record in records {
        let entry = channel_totals
            .entry(record.order_channel.clone())
            .or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.quantity as u64;
        channel_orders
            .entry(record.order_channel.clone())
            .or_default()
            .insert(record.sale_id.as_str());
    }

    let mut channels: Vec<ChannelBreakdown> = channel_totals
        .into_iter()
        .map(|(order_channel, (revenue, quantity))| {
            let order_count = channel_orders
                .get(&order_channel)
                .map(|ids| ids.len())
                .unwrap_or(0);
            ChannelBreakdown {
                revenue_share: if total_revenue > 0.0 {
                    revenue / total_revenue * 100.0
                } else {
                    0.0
                },
                order_channel,
                revenue,
                order_count,
                quantity,
            }
        })
        .collect();
    channels.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.order_channel.cmp(&b.order_channel))
    });

    Ok(SalesOverview {
        totals: OverviewTotals {
            revenue: total_revenue,
            quantity: total_quantity,
            order_count,
            avg_order_value: total_revenue / order_count as f64,
            product_count: products.len(),
            date_from: date_from.format("%Y-%m-%d").to_string(),
            date_to: date_to.format("%Y-%m-%d").to_string(),
        },
        channels,
        top_products: top_by_revenue(records, top_products_n, |r| r.product_name.as_str()),
        top_staff: top_by_revenue(records, top_staff_n, |r| r.staff_id.as_str()),
    })
}

/// Serialize the overview to pretty JSON next to the other outputs
pub fn write_json(path: &Path, overview: &SalesOverview) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(overview)?)?;
    tracing::info!("Wrote sales overview to {}", path.display());
    Ok(())
}

/// Top-N entries by summed revenue over an arbitrary key
fn top_by_revenue<'a, F>(records: &'a [SalesRecord], n: usize, key: F) -> Vec<TopEntry>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut totals: HashMap<&str, (f64, u64)> = HashMap::new();
    for record in records {
        let entry = totals.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.quantity as u64;
    }

    let mut entries: Vec<TopEntry> = totals
        .into_iter()
        .map(|(name, (revenue, quantity))| TopEntry {
            name: name.to_string(),
            revenue,
            quantity,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::enums::Size;

    fn record(id: &str, product: &str, channel: &str, staff: &str, revenue: f64) -> SalesRecord {
        SalesRecord {
            sale_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            product_name: product.to_string(),
            size: Size::M,
            order_channel: channel.to_string(),
            staff_id: staff.to_string(),
            quantity: 1,
            unit_price: revenue,
            revenue,
            year_month: "2024-01".to_string(),
            quarter: "2024-Q1".to_string(),
        }
    }

    #[test]
    fn test_totals_and_channel_shares() {
        let records = vec![
            record("S1", "Latte", "Online", "NV01", 300.0),
            record("S2", "Latte", "Offline", "NV02", 100.0),
            record("S3", "Espresso", "Online", "NV01", 100.0),
        ];

        let overview = build_overview(&records, 5, 5).unwrap();
        assert_eq!(overview.totals.revenue, 500.0);
        assert_eq!(overview.totals.order_count, 3);
        assert_eq!(overview.totals.product_count, 2);
        assert!((overview.totals.avg_order_value - 500.0 / 3.0).abs() < 1e-9);

        assert_eq!(overview.channels[0].order_channel, "Online");
        assert!((overview.channels[0].revenue_share - 80.0).abs() < 1e-9);
        assert_eq!(overview.channels[0].order_count, 2);
        assert!((overview.channels[1].revenue_share - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_lists_are_truncated_and_sorted() {
        let records = vec![
            record("S1", "Latte", "Online", "NV01", 100.0),
            record("S2", "Espresso", "Online", "NV02", 300.0),
            record("S3", "Mocha", "Online", "NV03", 200.0),
        ];

        let overview = build_overview(&records, 2, 1).unwrap();
        assert_eq!(overview.top_products.len(), 2);
        assert_eq!(overview.top_products[0].name, "Espresso");
        assert_eq!(overview.top_products[1].name, "Mocha");
        assert_eq!(overview.top_staff.len(), 1);
        assert_eq!(overview.top_staff[0].name, "NV02");
    }

    #[test]
    fn test_empty_dataset_is_error() {
        assert!(build_overview(&[], 5, 5).is_err());
    }
}

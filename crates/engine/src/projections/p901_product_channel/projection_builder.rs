use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::projections::p901_product_channel::dto::{
    ChannelCell, ProductChannelPivot, ProductChannelRow,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Build the product-by-channel pivot: revenue and quantity per
/// (product, channel), zero-filled over the union of channels,
/// sorted by total revenue descending.
pub fn build(records: &[SalesRecord]) -> ProductChannelPivot {
    let mut cells: HashMap<String, BTreeMap<String, ChannelCell>> = HashMap::new();
    let mut channel_names: BTreeSet<String> = BTreeSet::new();

    for record in records {
        channel_names.insert(record.order_channel.clone());
        let cell = cells
            .entry(record.product_name.clone())
            .or_default()
            .entry(record.order_channel.clone())
            .or_default();
        cell.revenue += record.revenue;
        cell.quantity += record.quantity as u64;
    }

    let channel_names: Vec<String> = channel_names.into_iter().collect();

    let mut rows: Vec<ProductChannelRow> = cells
        .into_iter()
        .map(|(product_name, mut by_channel)| {
            // Zero-fill every channel the product never sold through
            for channel in &channel_names {
                by_channel.entry(channel.clone()).or_default();
            }

            let total_revenue = by_channel.values().map(|c| c.revenue).sum();
            let total_quantity = by_channel.values().map(|c| c.quantity).sum();

            ProductChannelRow {
                product_name,
                channels: by_channel,
                total_revenue,
                total_quantity,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });

    ProductChannelPivot {
        channel_names,
        rows,
    }
}

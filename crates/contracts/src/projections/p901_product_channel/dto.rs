use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Revenue/quantity cell for one (product, channel) combination
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChannelCell {
    pub revenue: f64,
    pub quantity: u64,
}

/// One pivot row: a product with its per-channel sums.
/// Channels are keyed by normalized name; the map is ordered so the
/// flattened CSV columns come out alphabetically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductChannelRow {
    pub product_name: String,
    pub channels: BTreeMap<String, ChannelCell>,
    pub total_revenue: f64,
    pub total_quantity: u64,
}

/// Product-by-channel pivot, rows sorted by total revenue descending.
/// `channel_names` is the union of channels across all rows (alphabetical);
/// every row carries a cell for every channel, zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductChannelPivot {
    pub channel_names: Vec<String>,
    pub rows: Vec<ProductChannelRow>,
}

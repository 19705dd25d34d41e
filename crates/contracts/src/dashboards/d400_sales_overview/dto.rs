use serde::{Deserialize, Serialize};

/// Dataset-wide snapshot rendered on the dashboard home screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverview {
    pub totals: OverviewTotals,
    /// Sorted by revenue descending
    pub channels: Vec<ChannelBreakdown>,
    /// Top N products by revenue
    pub top_products: Vec<TopEntry>,
    /// Top N staff by revenue
    pub top_staff: Vec<TopEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewTotals {
    pub revenue: f64,
    pub quantity: u64,
    /// Distinct sale ids
    pub order_count: usize,
    pub avg_order_value: f64,
    pub product_count: usize,
    /// "YYYY-MM-DD", inclusive
    pub date_from: String,
    pub date_to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelBreakdown {
    pub order_channel: String,
    pub revenue: f64,
    /// Share of total revenue, percent
    pub revenue_share: f64,
    pub order_count: usize,
    pub quantity: u64,
}

/// Named total used for both top-product and top-staff lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopEntry {
    pub name: String,
    pub revenue: f64,
    pub quantity: u64,
}

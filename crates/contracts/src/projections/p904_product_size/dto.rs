use serde::{Deserialize, Serialize};

/// Product-by-size pivot row. The S/M/L columns are always present and
/// zero-filled, regardless of which sizes the product actually sold in.
/// Rows are sorted by total revenue descending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSizeRow {
    pub product_name: String,
    pub s_quantity: u64,
    pub s_revenue: f64,
    pub m_quantity: u64,
    pub m_revenue: f64,
    pub l_quantity: u64,
    pub l_revenue: f64,
    pub total_quantity: u64,
    pub total_revenue: f64,
}

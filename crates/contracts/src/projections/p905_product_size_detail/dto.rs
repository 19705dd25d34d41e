use serde::{Deserialize, Serialize};

use crate::enums::Size;

/// One row per (product, size) pair actually observed.
/// Sorted by product ascending, then revenue descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSizeDetailRow {
    pub product_name: String,
    pub size: Size,
    pub revenue: f64,
    pub quantity: u64,
}

pub mod p901_product_channel;
pub mod p902_monthly_trend;
pub mod p903_staff_performance;
pub mod p904_product_size;
pub mod p905_product_size_detail;

use serde::{Deserialize, Serialize};

/// One line of the pivot summary listing (the "Summary" sheet analog)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotSummaryEntry {
    pub table: String,
    pub rows: usize,
    pub columns: usize,
}

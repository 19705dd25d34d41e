use serde::{Deserialize, Serialize};

/// Per-staff totals, sorted by revenue descending. Rank is 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPerformanceRow {
    pub staff_id: String,
    pub revenue: f64,
    pub quantity: u64,
    pub rank: usize,
}

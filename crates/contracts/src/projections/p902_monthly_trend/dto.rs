use serde::{Deserialize, Serialize};

/// Revenue and quantity for one calendar month ("YYYY-MM").
/// Rows are sorted by month ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTrendRow {
    pub year_month: String,
    pub revenue: f64,
    pub quantity: u64,
}

use serde::{Deserialize, Serialize};

use crate::projections::p902_monthly_trend::dto::MonthlyTrendRow;

/// Least-squares line fitted over the monthly revenue series
/// (x = month index 0..n-1, y = revenue)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendFit {
    /// Revenue growth per month
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// One projected month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Continues the history index (n, n+1, ...)
    pub index: usize,
    /// Projected "YYYY-MM" label
    pub year_month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueForecast {
    pub fit: TrendFit,
    pub history: Vec<MonthlyTrendRow>,
    pub points: Vec<ForecastPoint>,
    pub horizon_months: usize,
}

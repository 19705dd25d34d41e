use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::Size;

/// Raw row as extracted from the sales export, before cleaning.
/// Every field is optional: the export is messy and missing values are
/// resolved (or the row dropped) by the cleaning service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSalesRow {
    pub sale_id: Option<String>,
    /// Raw date cell, unparsed (format varies across exports)
    pub date: Option<String>,
    pub product_name: Option<String>,
    pub size: Option<String>,
    pub order_channel: Option<String>,
    pub staff_id: Option<String>,
    pub quantity: Option<i64>,
    /// Actual selling price per unit
    pub unit_price: Option<f64>,
    pub revenue: Option<f64>,
    /// 1-based line in the source file, used for synthetic keys and warnings
    pub source_line: usize,
}

/// Cleaned, fully typed sales record. One row per sale line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sale_id: String,
    pub date: NaiveDate,
    pub product_name: String,
    pub size: Size,
    pub order_channel: String,
    pub staff_id: String,
    pub quantity: u32,
    /// Actual selling price per unit
    pub unit_price: f64,
    pub revenue: f64,

    // Derived dimensions
    /// "YYYY-MM"
    pub year_month: String,
    /// "YYYY-Qn"
    pub quarter: String,
}

/// Counts of every cleaning rule applied during normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub dropped_missing_date: usize,
    pub dropped_missing_product: usize,
    pub dropped_unrecoverable_amount: usize,
    pub dropped_nonpositive_quantity: usize,
    pub duplicates_removed: usize,
    pub imputed_size: usize,
    pub imputed_quantity: usize,
    pub recomputed_revenue: usize,
    pub recovered_unit_price: usize,
    pub synthetic_ids: usize,
}

impl CleaningReport {
    /// Total rows dropped for any reason
    pub fn dropped(&self) -> usize {
        self.dropped_missing_date
            + self.dropped_missing_product
            + self.dropped_unrecoverable_amount
            + self.dropped_nonpositive_quantity
            + self.duplicates_removed
    }
}

use anyhow::Result;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::enums::Size;
use plotters::style::colors::full_palette::{BLUE_600, TEAL_600};
use std::collections::HashMap;
use std::path::Path;

use crate::shared::format::{format_money, format_number};

use super::{bar_chart, stacked_bar_chart, ChartSeries};

/// Top products by units sold
pub fn top_products_quantity(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut totals: HashMap<&str, u64> = HashMap::new();
    for r in records {
        *totals.entry(r.product_name.as_str()).or_default() += r.quantity as u64;
    }

    let mut rows: Vec<(&str, u64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows.truncate(top_n);

    let labels: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
    let values: Vec<f64> = rows.iter().map(|(_, q)| *q as f64).collect();

    bar_chart(
        path,
        "Top Products by Quantity",
        &labels,
        &values,
        TEAL_600,
        &|v| format_number(v.round() as u64),
    )?;
    Ok(true)
}

/// Top products by revenue
pub fn top_products_revenue(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut totals: HashMap<&str, f64> = HashMap::new();
    for r in records {
        *totals.entry(r.product_name.as_str()).or_default() += r.revenue;
    }

    let mut rows: Vec<(&str, f64)> = totals.into_iter().collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    rows.truncate(top_n);

    let labels: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
    let values: Vec<f64> = rows.iter().map(|(_, rev)| *rev).collect();

    bar_chart(
        path,
        "Top Products by Revenue",
        &labels,
        &values,
        BLUE_600,
        &format_money,
    )?;
    Ok(true)
}

/// Size mix (S/M/L quantities) for the best-selling products, stacked
pub fn product_size_distribution(
    records: &[SalesRecord],
    path: &Path,
    top_n: usize,
) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut by_product: HashMap<&str, [u64; 3]> = HashMap::new();
    for r in records {
        let sizes = by_product.entry(r.product_name.as_str()).or_default();
        let slot = match r.size {
            Size::S => 0,
            Size::M => 1,
            Size::L => 2,
        };
        sizes[slot] += r.quantity as u64;
    }

    let mut rows: Vec<(&str, [u64; 3])> = by_product.into_iter().collect();
    rows.sort_by(|a, b| {
        let qa: u64 = a.1.iter().sum();
        let qb: u64 = b.1.iter().sum();
        qb.cmp(&qa).then_with(|| a.0.cmp(b.0))
    });
    rows.truncate(top_n);

    let labels: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
    let series: Vec<ChartSeries> = Size::ALL
        .iter()
        .enumerate()
        .map(|(slot, size)| ChartSeries {
            name: size.as_str().to_string(),
            values: rows.iter().map(|(_, sizes)| sizes[slot] as f64).collect(),
        })
        .collect();

    stacked_bar_chart(
        path,
        "Size Distribution of Top Products",
        &labels,
        &series,
        &|v| format_number(v.round() as u64),
    )?;
    Ok(true)
}

use anyhow::Result;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use plotters::style::colors::full_palette::GREEN_600;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::shared::format::format_money;

use super::{bar_chart, line_chart, stacked_bar_chart, ChartSeries};

fn top_staff(records: &[SalesRecord], top_n: usize) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for r in records {
        *totals.entry(r.staff_id.as_str()).or_default() += r.revenue;
    }

    let mut rows: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(id, rev)| (id.to_string(), rev))
        .collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    rows.truncate(top_n);
    rows
}

/// Revenue ranking of the best performing staff
pub fn top_staff_performance(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let rows = top_staff(records, top_n);
    let labels: Vec<String> = rows.iter().map(|(id, _)| id.clone()).collect();
    let values: Vec<f64> = rows.iter().map(|(_, rev)| *rev).collect();

    bar_chart(
        path,
        "Top Staff by Revenue",
        &labels,
        &values,
        GREEN_600,
        &format_money,
    )?;
    Ok(true)
}

/// Revenue of the top staff, stacked by order channel
pub fn staff_by_channel(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let staff = top_staff(records, top_n);
    let channels: BTreeSet<&str> = records.iter().map(|r| r.order_channel.as_str()).collect();

    let mut totals: HashMap<(&str, &str), f64> = HashMap::new();
    for r in records {
        *totals
            .entry((r.staff_id.as_str(), r.order_channel.as_str()))
            .or_default() += r.revenue;
    }

    let labels: Vec<String> = staff.iter().map(|(id, _)| id.clone()).collect();
    let series: Vec<ChartSeries> = channels
        .iter()
        .map(|channel| ChartSeries {
            name: channel.to_string(),
            values: staff
                .iter()
                .map(|(id, _)| totals.get(&(id.as_str(), *channel)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    stacked_bar_chart(path, "Staff Revenue by Channel", &labels, &series, &format_money)?;
    Ok(true)
}

/// Monthly revenue line per top staff member
pub fn staff_trend(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let staff = top_staff(records, top_n);
    let months: BTreeSet<&str> = records.iter().map(|r| r.year_month.as_str()).collect();

    let mut totals: HashMap<(&str, &str), f64> = HashMap::new();
    for r in records {
        *totals
            .entry((r.staff_id.as_str(), r.year_month.as_str()))
            .or_default() += r.revenue;
    }

    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    let series: Vec<ChartSeries> = staff
        .iter()
        .map(|(id, _)| ChartSeries {
            name: id.clone(),
            values: months
                .iter()
                .map(|month| totals.get(&(id.as_str(), *month)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    line_chart(path, "Revenue Trend of Top Staff", &labels, &series, &format_money)?;
    Ok(true)
}

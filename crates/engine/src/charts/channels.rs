use anyhow::Result;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use plotters::prelude::*;
use plotters::style::colors::full_palette::{AMBER_600, INDIGO_600};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::shared::format::{format_money, format_number};

use super::{draw_bars_on, grouped_bar_chart, line_chart, ChartSeries, CHART_HEIGHT, CHART_WIDTH};

/// Two-panel channel overview: revenue on the left, order count on the right
pub fn channel_analysis(records: &[SalesRecord], path: &Path) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut revenues_by_channel: BTreeMap<&str, f64> = BTreeMap::new();
    let mut orders_by_channel: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for r in records {
        *revenues_by_channel.entry(r.order_channel.as_str()).or_default() += r.revenue;
        orders_by_channel
            .entry(r.order_channel.as_str())
            .or_default()
            .insert(r.sale_id.as_str());
    }

    let labels: Vec<String> = revenues_by_channel.keys().map(|c| c.to_string()).collect();
    let revenues: Vec<f64> = revenues_by_channel.values().copied().collect();
    let orders: Vec<f64> = orders_by_channel.values().map(|ids| ids.len() as f64).collect();

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(CHART_WIDTH as i32 / 2);

    draw_bars_on(&left, "Revenue by Channel", &labels, &revenues, INDIGO_600, &format_money)?;
    draw_bars_on(&right, "Orders by Channel", &labels, &orders, AMBER_600, &|v| {
        format_number(v.round() as u64)
    })?;

    root.present()?;
    Ok(true)
}

/// Revenue of the top products, one bar cluster per product split by channel
pub fn channel_by_product(records: &[SalesRecord], path: &Path, top_n: usize) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let channels: BTreeSet<&str> = records.iter().map(|r| r.order_channel.as_str()).collect();

    let mut by_product: HashMap<&str, (f64, HashMap<&str, f64>)> = HashMap::new();
    for r in records {
        let entry = by_product.entry(r.product_name.as_str()).or_default();
        entry.0 += r.revenue;
        *entry.1.entry(r.order_channel.as_str()).or_default() += r.revenue;
    }

    let mut rows: Vec<(&str, (f64, HashMap<&str, f64>))> = by_product.into_iter().collect();
    rows.sort_by(|a, b| {
        b.1 .0
            .partial_cmp(&a.1 .0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    rows.truncate(top_n);

    let labels: Vec<String> = rows.iter().map(|(name, _)| name.to_string()).collect();
    let series: Vec<ChartSeries> = channels
        .iter()
        .map(|channel| ChartSeries {
            name: channel.to_string(),
            values: rows
                .iter()
                .map(|(_, (_, per_channel))| per_channel.get(channel).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    grouped_bar_chart(path, "Channel Mix of Top Products", &labels, &series, &format_money)?;
    Ok(true)
}

/// Monthly revenue line per channel
pub fn channel_trend(records: &[SalesRecord], path: &Path) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let months: BTreeSet<&str> = records.iter().map(|r| r.year_month.as_str()).collect();
    let channels: BTreeSet<&str> = records.iter().map(|r| r.order_channel.as_str()).collect();

    let mut totals: HashMap<(&str, &str), f64> = HashMap::new();
    for r in records {
        *totals
            .entry((r.order_channel.as_str(), r.year_month.as_str()))
            .or_default() += r.revenue;
    }

    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    let series: Vec<ChartSeries> = channels
        .iter()
        .map(|channel| ChartSeries {
            name: channel.to_string(),
            values: months
                .iter()
                .map(|month| totals.get(&(*channel, *month)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    line_chart(path, "Revenue Trend by Channel", &labels, &series, &format_money)?;
    Ok(true)
}

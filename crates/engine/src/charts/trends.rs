use anyhow::Result;
use contracts::dashboards::d401_revenue_forecast::dto::RevenueForecast;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::projections::p902_monthly_trend::dto::MonthlyTrendRow;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::colors::full_palette::{ORANGE_600, PURPLE_600};
use std::collections::BTreeMap;
use std::path::Path;

use crate::shared::format::{format_millions, format_money};

use super::{bar_chart, line_chart, short_label, ChartSeries, CHART_HEIGHT, CHART_WIDTH};

/// Revenue per calendar day
pub fn daily_revenue(records: &[SalesRecord], path: &Path) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut by_day: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *by_day.entry(r.date).or_default() += r.revenue;
    }

    let labels: Vec<String> = by_day.keys().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    let series = [ChartSeries {
        name: "Revenue".to_string(),
        values: by_day.values().copied().collect(),
    }];

    line_chart(path, "Daily Revenue", &labels, &series, &format_money)?;
    Ok(true)
}

/// Revenue per month, as bars
pub fn monthly_trend(history: &[MonthlyTrendRow], path: &Path) -> Result<bool> {
    if history.is_empty() {
        return Ok(false);
    }

    let labels: Vec<String> = history.iter().map(|r| r.year_month.clone()).collect();
    let values: Vec<f64> = history.iter().map(|r| r.revenue).collect();

    bar_chart(path, "Monthly Revenue (million)", &labels, &values, PURPLE_600, &format_millions)?;
    Ok(true)
}

/// Revenue per quarter, as bars
pub fn quarterly_comparison(records: &[SalesRecord], path: &Path) -> Result<bool> {
    if records.is_empty() {
        return Ok(false);
    }

    let mut by_quarter: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *by_quarter.entry(r.quarter.as_str()).or_default() += r.revenue;
    }

    let labels: Vec<String> = by_quarter.keys().map(|q| q.to_string()).collect();
    let values: Vec<f64> = by_quarter.values().copied().collect();

    bar_chart(path, "Quarterly Revenue", &labels, &values, ORANGE_600, &format_money)?;
    Ok(true)
}

/// Monthly history plus the fitted-trend projection, as two lines
pub fn revenue_forecast(forecast: &RevenueForecast, path: &Path) -> Result<bool> {
    if forecast.history.is_empty() {
        return Ok(false);
    }

    let n = forecast.history.len();
    let labels: Vec<String> = forecast
        .history
        .iter()
        .map(|r| r.year_month.clone())
        .chain(forecast.points.iter().map(|p| p.year_month.clone()))
        .collect();

    let max = forecast
        .history
        .iter()
        .map(|r| r.revenue)
        .chain(forecast.points.iter().map(|p| p.revenue))
        .fold(0.0_f64, f64::max);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Revenue Forecast (million)", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(80)
        .y_label_area_size(90)
        .build_cartesian_2d(0..(labels.len() as i32 - 1).max(1), 0.0..max.max(1.0) * 1.1)?;

    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|i| {
            labels
                .get(*i as usize)
                .map(|l| short_label(l))
                .unwrap_or_default()
        })
        .y_label_formatter(&|v| format_millions(*v))
        .draw()?;

    chart
        .draw_series(
            LineSeries::new(
                forecast
                    .history
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (i as i32, r.revenue)),
                BLUE.stroke_width(2),
            )
            .point_size(3),
        )?
        .label("History")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], BLUE.stroke_width(2)));

    // fitted line across the whole range, dashed
    let fit = forecast.fit;
    chart
        .draw_series(DashedLineSeries::new(
            (0..labels.len() as i32).map(|i| (i, fit.slope * i as f64 + fit.intercept)),
            8,
            6,
            BLACK.mix(0.4).stroke_width(1),
        ))?
        .label("Trend")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], BLACK.mix(0.4)));

    // projection starts from the last observed month so the lines connect
    let last = forecast.history[n - 1].revenue;
    let projection: Vec<(i32, f64)> = std::iter::once((n as i32 - 1, last))
        .chain(
            forecast
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| ((n + i) as i32, p.revenue)),
        )
        .collect();

    chart
        .draw_series(LineSeries::new(projection, RED.stroke_width(2)).point_size(3))?
        .label("Forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(true)
}

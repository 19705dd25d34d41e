use anyhow::{Context, Result};
use contracts::dashboards::d401_revenue_forecast::dto::RevenueForecast;
use contracts::domain::a001_sales_record::aggregate::{CleaningReport, SalesRecord};
use contracts::projections::PivotSummaryEntry;

use crate::charts;
use crate::dashboards::{d400_sales_overview, d401_revenue_forecast};
use crate::domain::a001_sales_record;
use crate::projections::{
    p901_product_channel, p902_monthly_trend, p903_staff_performance, p904_product_size,
    p905_product_size_detail, summary,
};
use crate::shared::config::Config;
use crate::shared::format::{format_money, format_number};
use crate::usecases::u501_import_sales;

/// Import the raw export, clean it and persist the cleaned dataset
pub fn import_and_clean(config: &Config) -> Result<(Vec<SalesRecord>, CleaningReport)> {
    let input = config.input_path();
    let (raw_rows, stats) =
        u501_import_sales::import_sales_export(&input, config.delimiter_byte()?)
            .with_context(|| format!("importing {}", input.display()))?;

    let (records, report) = a001_sales_record::service::clean(raw_rows);

    tracing::info!(
        "Cleaning done: {} read, {} kept, {} dropped, {} duplicates removed",
        format_number(report.rows_in as u64),
        format_number(report.rows_out as u64),
        format_number(report.dropped() as u64),
        format_number(report.duplicates_removed as u64),
    );
    if stats.rows_skipped > 0 {
        tracing::warn!("{} unreadable rows skipped during import", stats.rows_skipped);
    }

    a001_sales_record::repository::save_cleaned(&config.cleaned_data_path(), &records)?;
    Ok((records, report))
}

/// Load the cleaned dataset written by a previous import run
pub fn load_cleaned(config: &Config) -> Result<Vec<SalesRecord>> {
    a001_sales_record::repository::load_cleaned(&config.cleaned_data_path())
}

/// Build all five pivot tables and the summary listing
pub fn build_pivots(config: &Config, records: &[SalesRecord]) -> Result<()> {
    let dir = config.pivots_dir();
    let mut entries: Vec<PivotSummaryEntry> = Vec::new();

    let product_channel = p901_product_channel::projection_builder::build(records);
    p901_product_channel::repository::write(&dir.join("product_channel.csv"), &product_channel)?;
    entries.push(PivotSummaryEntry {
        table: "product_channel".to_string(),
        rows: product_channel.rows.len(),
        columns: p901_product_channel::repository::column_count(&product_channel),
    });

    let monthly = p902_monthly_trend::projection_builder::build(records);
    p902_monthly_trend::repository::write(&dir.join("monthly_trend.csv"), &monthly)?;
    entries.push(PivotSummaryEntry {
        table: "monthly_trend".to_string(),
        rows: monthly.len(),
        columns: p902_monthly_trend::repository::COLUMNS,
    });

    let staff = p903_staff_performance::projection_builder::build(records);
    p903_staff_performance::repository::write(&dir.join("staff_performance.csv"), &staff)?;
    entries.push(PivotSummaryEntry {
        table: "staff_performance".to_string(),
        rows: staff.len(),
        columns: p903_staff_performance::repository::COLUMNS,
    });

    let product_size = p904_product_size::projection_builder::build(records);
    p904_product_size::repository::write(&dir.join("product_size.csv"), &product_size)?;
    entries.push(PivotSummaryEntry {
        table: "product_size".to_string(),
        rows: product_size.len(),
        columns: p904_product_size::repository::COLUMNS,
    });

    let detail = p905_product_size_detail::projection_builder::build(records);
    p905_product_size_detail::repository::write(&dir.join("product_size_detail.csv"), &detail)?;
    entries.push(PivotSummaryEntry {
        table: "product_size_detail".to_string(),
        rows: detail.len(),
        columns: p905_product_size_detail::repository::COLUMNS,
    });

    summary::write_summary(&dir.join("summary.csv"), &entries)?;
    tracing::info!("Built {} pivot tables in {}", entries.len(), dir.display());
    Ok(())
}

/// Build the overview snapshot and write overview.json
pub fn build_overview(config: &Config, records: &[SalesRecord]) -> Result<()> {
    let overview = d400_sales_overview::service::build_overview(
        records,
        config.analysis.top_products,
        config.analysis.top_staff,
    )?;

    tracing::info!(
        "Overview: {} revenue over {} orders ({} - {})",
        format_money(overview.totals.revenue),
        format_number(overview.totals.order_count as u64),
        overview.totals.date_from,
        overview.totals.date_to,
    );

    d400_sales_overview::service::write_json(&config.output_dir().join("overview.json"), &overview)
}

/// Fit the monthly trend and write forecast.json
pub fn build_forecast(
    config: &Config,
    records: &[SalesRecord],
    horizon: Option<usize>,
) -> Result<RevenueForecast> {
    let history = p902_monthly_trend::projection_builder::build(records);
    let horizon = horizon.unwrap_or(config.analysis.forecast_months);
    let forecast = d401_revenue_forecast::service::forecast(&history, horizon)?;
    d401_revenue_forecast::service::write_json(
        &config.output_dir().join("forecast.json"),
        &forecast,
    )?;
    Ok(forecast)
}

/// Forecast for chart rendering only, nothing written to disk.
/// None when the history is too short for a fit.
pub fn forecast_for_charts(config: &Config, records: &[SalesRecord]) -> Option<RevenueForecast> {
    let history = p902_monthly_trend::projection_builder::build(records);
    match d401_revenue_forecast::service::forecast(&history, config.analysis.forecast_months) {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            tracing::warn!("Revenue forecast skipped: {}", e);
            None
        }
    }
}

/// Render every chart into the charts directory
pub fn render_charts(
    config: &Config,
    records: &[SalesRecord],
    forecast: Option<&RevenueForecast>,
) -> Result<usize> {
    let history = p902_monthly_trend::projection_builder::build(records);
    let top_n = config.analysis.top_products;
    charts::render_all(records, &history, forecast, &config.charts_dir(), top_n)
}

/// Full run: import, clean, pivots, overview, forecast, charts
pub fn run_all(config: &Config) -> Result<()> {
    let (records, _report) = import_and_clean(config)?;

    build_pivots(config, &records)?;
    build_overview(config, &records)?;

    // a forecast needs at least two months of history; a short dataset
    // should not fail the whole run
    let forecast = match build_forecast(config, &records, None) {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            tracing::warn!("Revenue forecast skipped: {}", e);
            None
        }
    };

    render_charts(config, &records, forecast.as_ref())?;
    tracing::info!("Analysis complete, outputs in {}", config.output_dir().display());
    Ok(())
}

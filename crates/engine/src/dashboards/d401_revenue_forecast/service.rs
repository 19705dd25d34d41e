use anyhow::Result;
use contracts::dashboards::d401_revenue_forecast::dto::{ForecastPoint, RevenueForecast, TrendFit};
use contracts::projections::p902_monthly_trend::dto::MonthlyTrendRow;
use std::path::Path;

/// Forecast horizon is clamped into this range
pub const MIN_HORIZON: usize = 1;
pub const MAX_HORIZON: usize = 12;

/// Fit a least-squares line over the monthly revenue series,
/// x = month index 0..n-1, y = revenue
pub fn fit(history: &[MonthlyTrendRow]) -> Result<TrendFit> {
    let n = history.len();
    if n < 2 {
        anyhow::bail!(
            "revenue forecast needs at least two months of history, got {}",
            n
        );
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y: f64 = history.iter().map(|r| r.revenue).sum::<f64>() / n_f;

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    for (i, row) in history.iter().enumerate() {
        let dx = i as f64 - mean_x;
        ss_xy += dx * (row.revenue - mean_y);
        ss_xx += dx * dx;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = history
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let predicted = slope * i as f64 + intercept;
            (row.revenue - predicted).powi(2)
        })
        .sum();
    let ss_tot: f64 = history
        .iter()
        .map(|row| (row.revenue - mean_y).powi(2))
        .sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };

    Ok(TrendFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Project revenue for the next `horizon` months (clamped to 1..=12)
pub fn forecast(history: &[MonthlyTrendRow], horizon: usize) -> Result<RevenueForecast> {
    let horizon = horizon.clamp(MIN_HORIZON, MAX_HORIZON);
    let trend = fit(history)?;

    let last_month = &history[history.len() - 1].year_month;
    let n = history.len();

    let points: Vec<ForecastPoint> = (0..horizon)
        .map(|step| {
            let index = n + step;
            ForecastPoint {
                index,
                year_month: shift_month(last_month, step as i32 + 1),
                revenue: trend.slope * index as f64 + trend.intercept,
            }
        })
        .collect();

    tracing::info!(
        "Revenue forecast: slope {:.0}/month over {} months, projecting {} ahead",
        trend.slope,
        n,
        horizon
    );

    Ok(RevenueForecast {
        fit: trend,
        history: history.to_vec(),
        points,
        horizon_months: horizon,
    })
}

pub fn write_json(path: &Path, forecast: &RevenueForecast) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(forecast)?)?;
    tracing::info!("Wrote revenue forecast to {}", path.display());
    Ok(())
}

/// Shift a "YYYY-MM" label by a number of months, with year rollover.
/// Unparseable labels come back unchanged.
fn shift_month(year_month: &str, months: i32) -> String {
    let mut parts = year_month.splitn(2, '-');
    let (Some(y), Some(m)) = (parts.next(), parts.next()) else {
        return year_month.to_string();
    };
    let (Ok(y), Ok(m)) = (y.parse::<i32>(), m.parse::<i32>()) else {
        return year_month.to_string();
    };

    let total = y * 12 + (m - 1) + months;
    let ny = total.div_euclid(12);
    let nm = total.rem_euclid(12) + 1;
    format!("{:04}-{:02}", ny, nm)
}

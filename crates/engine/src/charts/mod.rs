pub mod channels;
pub mod products;
pub mod staff;
pub mod trends;

use anyhow::Result;
use contracts::dashboards::d401_revenue_forecast::dto::RevenueForecast;
use contracts::domain::a001_sales_record::aggregate::SalesRecord;
use contracts::projections::p902_monthly_trend::dto::MonthlyTrendRow;
use plotters::prelude::*;
use std::path::Path;

pub const CHART_WIDTH: u32 = 1280;
pub const CHART_HEIGHT: u32 = 720;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

/// Render every chart into `dir`, returning how many were actually
/// produced. Charts with no underlying data are skipped, not errors.
pub fn render_all(
    records: &[SalesRecord],
    history: &[MonthlyTrendRow],
    forecast: Option<&RevenueForecast>,
    dir: &Path,
    top_n: usize,
) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut rendered = 0usize;
    let mut count = |name: &str, ok: bool| {
        if ok {
            rendered += 1;
        } else {
            tracing::warn!("Chart {} skipped: no data", name);
        }
    };

    count(
        "top_products_quantity",
        products::top_products_quantity(records, &dir.join("top_products_quantity.png"), top_n)?,
    );
    count(
        "top_products_revenue",
        products::top_products_revenue(records, &dir.join("top_products_revenue.png"), top_n)?,
    );
    count(
        "product_size_distribution",
        products::product_size_distribution(
            records,
            &dir.join("product_size_distribution.png"),
            top_n,
        )?,
    );
    count(
        "channel_analysis",
        channels::channel_analysis(records, &dir.join("channel_analysis.png"))?,
    );
    count(
        "channel_by_product",
        // grouped bars get unreadable past a handful of clusters
        channels::channel_by_product(records, &dir.join("channel_by_product.png"), top_n.min(5))?,
    );
    count(
        "channel_trend",
        channels::channel_trend(records, &dir.join("channel_trend.png"))?,
    );
    count(
        "top_staff_performance",
        staff::top_staff_performance(records, &dir.join("top_staff_performance.png"), top_n)?,
    );
    count(
        "staff_by_channel",
        staff::staff_by_channel(records, &dir.join("staff_by_channel.png"), top_n)?,
    );
    count(
        "staff_trend",
        staff::staff_trend(records, &dir.join("staff_trend.png"), top_n)?,
    );
    count(
        "daily_revenue",
        trends::daily_revenue(records, &dir.join("daily_revenue.png"))?,
    );
    count(
        "monthly_trend",
        trends::monthly_trend(history, &dir.join("monthly_trend.png"))?,
    );
    count(
        "quarterly_comparison",
        trends::quarterly_comparison(records, &dir.join("quarterly_comparison.png"))?,
    );
    if let Some(forecast) = forecast {
        count(
            "revenue_forecast",
            trends::revenue_forecast(forecast, &dir.join("revenue_forecast.png"))?,
        );
    }

    tracing::info!("Rendered {} charts into {}", rendered, dir.display());
    Ok(rendered)
}

/// Named value series shared by the multi-series chart helpers
pub(crate) struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

pub(crate) fn short_label(label: &str) -> String {
    if label.chars().count() > 18 {
        let cut: String = label.chars().take(17).collect();
        format!("{}…", cut)
    } else {
        label.to_string()
    }
}

fn y_range(max: f64) -> std::ops::Range<f64> {
    0.0..(max.max(1.0) * 1.1)
}

/// Single-series vertical bar chart over categorical labels
pub(crate) fn bar_chart(
    path: &Path,
    caption: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
    y_fmt: &dyn Fn(f64) -> String,
) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    draw_bars_on(&root, caption, labels, values, color, y_fmt)?;
    root.present()?;
    Ok(())
}

/// Same bar chart, but drawn into an existing drawing area so panels
/// can share one bitmap
pub(crate) fn draw_bars_on<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
    y_fmt: &dyn Fn(f64) -> String,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    area.fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("chart fill: {}", e))?;

    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let n = labels.len() as i32;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(120)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n - 1).into_segmented(), y_range(max))
        .map_err(|e| anyhow::anyhow!("chart build: {}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|l| short_label(l))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(LABEL_FONT.into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| y_fmt(*v))
        .y_label_style(LABEL_FONT)
        .draw()
        .map_err(|e| anyhow::anyhow!("chart mesh: {}", e))?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
                color.filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(|e| anyhow::anyhow!("chart bars: {}", e))?;

    Ok(())
}

/// Grouped bar chart: one cluster of bars per group label, one bar per
/// series inside the cluster, with a legend
pub(crate) fn grouped_bar_chart(
    path: &Path,
    caption: &str,
    group_labels: &[String],
    series: &[ChartSeries],
    y_fmt: &dyn Fn(f64) -> String,
) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let max = series
        .iter()
        .flat_map(|s| s.values.iter().cloned())
        .fold(0.0_f64, f64::max);

    // one slot per bar plus an empty separator slot between clusters
    let stride = series.len() as i32 + 1;
    let total_slots = group_labels.len() as i32 * stride - 1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(120)
        .y_label_area_size(90)
        .build_cartesian_2d((0..total_slots - 1).into_segmented(), y_range(max))?;

    let mid = series.len() as i32 / 2;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(total_slots as usize)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(slot) if slot % stride == mid => group_labels
                .get((slot / stride) as usize)
                .map(|l| short_label(l))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(LABEL_FONT.into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| y_fmt(*v))
        .y_label_style(LABEL_FONT)
        .draw()?;

    for (s_idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(s_idx).to_rgba();
        chart
            .draw_series(s.values.iter().enumerate().map(|(g_idx, v)| {
                let slot = g_idx as i32 * stride + s_idx as i32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(slot), 0.0),
                        (SegmentValue::Exact(slot + 1), *v),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 2, 2);
                bar
            }))?
            .label(&s.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Stacked bar chart: one bar per group, series stacked on top of each
/// other in declaration order
pub(crate) fn stacked_bar_chart(
    path: &Path,
    caption: &str,
    group_labels: &[String],
    series: &[ChartSeries],
    y_fmt: &dyn Fn(f64) -> String,
) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = group_labels.len();
    let max = (0..n)
        .map(|g| series.iter().map(|s| s.values[g]).sum::<f64>())
        .fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(120)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n as i32 - 1).into_segmented(), y_range(max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => group_labels
                .get(*i as usize)
                .map(|l| short_label(l))
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(LABEL_FONT.into_font().transform(FontTransform::Rotate90))
        .y_label_formatter(&|v| y_fmt(*v))
        .y_label_style(LABEL_FONT)
        .draw()?;

    let mut base = vec![0.0_f64; n];
    for (s_idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(s_idx).to_rgba();
        let segments: Vec<(i32, f64, f64)> = s
            .values
            .iter()
            .enumerate()
            .map(|(g, v)| {
                let from = base[g];
                base[g] += v;
                (g as i32, from, base[g])
            })
            .collect();
        chart
            .draw_series(segments.into_iter().map(|(g, from, to)| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(g), from), (SegmentValue::Exact(g + 1), to)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 8, 8);
                bar
            }))?
            .label(&s.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Multi-series line chart over shared categorical x labels
pub(crate) fn line_chart(
    path: &Path,
    caption: &str,
    x_labels: &[String],
    series: &[ChartSeries],
    y_fmt: &dyn Fn(f64) -> String,
) -> Result<()> {
    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let max = series
        .iter()
        .flat_map(|s| s.values.iter().cloned())
        .fold(0.0_f64, f64::max);
    let n = x_labels.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, CAPTION_FONT)
        .margin(15)
        .x_label_area_size(80)
        .y_label_area_size(90)
        .build_cartesian_2d(0..(n - 1).max(1), y_range(max))?;

    chart
        .configure_mesh()
        .x_labels(x_labels.len())
        .x_label_formatter(&|i| {
            x_labels
                .get(*i as usize)
                .map(|l| short_label(l))
                .unwrap_or_default()
        })
        .x_label_style(LABEL_FONT)
        .y_label_formatter(&|v| y_fmt(*v))
        .y_label_style(LABEL_FONT)
        .draw()?;

    for (s_idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(s_idx).to_rgba();
        chart
            .draw_series(
                LineSeries::new(
                    s.values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                    color.stroke_width(2),
                )
                .point_size(3),
            )?
            .label(&s.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 14, y)], color.stroke_width(2))
            });
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

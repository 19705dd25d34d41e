use engine::pipeline;
use engine::shared::config::{AnalysisConfig, Config, InputConfig, OutputConfig};
use std::path::Path;

const FIXTURE: &str = "\
Sale_id;Date;Product_Name;Size;Order_Channel;Staff_id;Quantity;Unit_Price;Revenue
S001;2024-01-05;Cafe Sua Da;M;online;NV01;2;25000;50000
S002;2024-01-06;Cafe Sua Da;L;offline;NV02;1;30000;30000
S003;2024-01-15;Bac Xiu;S;online;NV01;3;20000;60000
S004;2024-02-03;Cafe Sua Da;M;online;NV03;1;25000;25000
S005;2024-02-10;Bac Xiu;M;offline;NV02;2;22000;44000
S006;2024-02-20;Tra Dao;L;online;NV01;1;35000;35000
S007;2024-03-01;Tra Dao;M;offline;NV03;2;32000;
S008;2024-03-08;Bac Xiu;;online;NV02;1;20000;20000
S009;;Cafe Sua Da;M;online;NV01;1;25000;25000
S010;2024-03-12;Cafe Sua Da;M;online;NV01;0;25000;0
";

fn test_config(dir: &Path) -> Config {
    let input = dir.join("sales_export.csv");
    std::fs::write(&input, FIXTURE).unwrap();
    Config {
        input: InputConfig {
            path: input.to_string_lossy().into_owned(),
            delimiter: ";".to_string(),
        },
        output: OutputConfig {
            dir: dir.join("output").to_string_lossy().into_owned(),
        },
        analysis: AnalysisConfig::default(),
    }
}

#[test]
fn test_full_pipeline_writes_all_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let (records, report) = pipeline::import_and_clean(&config).unwrap();

    // S009 has no date, S010 has zero quantity; everything else survives
    assert_eq!(report.rows_in, 10);
    assert_eq!(records.len(), 8);
    assert_eq!(report.dropped_missing_date, 1);
    assert_eq!(report.dropped_nonpositive_quantity, 1);
    // S007 had a missing revenue recovered from unit price
    assert_eq!(report.recomputed_revenue, 1);
    // S008 had no size
    assert_eq!(report.imputed_size, 1);

    assert!(config.cleaned_data_path().exists());

    let reloaded = pipeline::load_cleaned(&config).unwrap();
    assert_eq!(reloaded.len(), records.len());

    pipeline::build_pivots(&config, &records).unwrap();
    for table in [
        "product_channel.csv",
        "monthly_trend.csv",
        "staff_performance.csv",
        "product_size.csv",
        "product_size_detail.csv",
        "summary.csv",
    ] {
        assert!(
            config.pivots_dir().join(table).exists(),
            "missing pivot {}",
            table
        );
    }

    let summary = std::fs::read_to_string(config.pivots_dir().join("summary.csv")).unwrap();
    assert!(summary.starts_with("Pivot_Table,Rows,Columns"));
    assert_eq!(summary.trim_end().lines().count(), 6);

    pipeline::build_overview(&config, &records).unwrap();
    let overview = std::fs::read_to_string(config.output_dir().join("overview.json")).unwrap();
    let overview: serde_json::Value = serde_json::from_str(&overview).unwrap();
    assert_eq!(overview["totals"]["order_count"], 8);
    assert_eq!(overview["totals"]["date_from"], "2024-01-05");
    assert_eq!(overview["totals"]["date_to"], "2024-03-08");

    let forecast = pipeline::build_forecast(&config, &records, Some(2)).unwrap();
    assert_eq!(forecast.horizon_months, 2);
    assert_eq!(forecast.history.len(), 3);
    assert_eq!(forecast.points[0].year_month, "2024-04");
    assert!(config.output_dir().join("forecast.json").exists());
}

#[test]
fn test_monthly_trend_pivot_contents() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let (records, _) = pipeline::import_and_clean(&config).unwrap();
    pipeline::build_pivots(&config, &records).unwrap();

    let trend = std::fs::read_to_string(config.pivots_dir().join("monthly_trend.csv")).unwrap();
    let lines: Vec<&str> = trend.trim_end().lines().collect();
    assert_eq!(lines[0], "Year_Month,Revenue,Quantity");
    assert!(lines[1].starts_with("2024-01,140000.00,6"));
    assert!(lines[2].starts_with("2024-02,104000.00,4"));
    // S007 revenue recovered as 2 * 32000, plus S008
    assert!(lines[3].starts_with("2024-03,84000.00,3"));
}

#[test]
fn test_forecast_for_charts_follows_history_length() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let (records, _) = pipeline::import_and_clean(&config).unwrap();

    // three months of history: the chart rendering gets a forecast
    let forecast = pipeline::forecast_for_charts(&config, &records).unwrap();
    assert_eq!(forecast.history.len(), 3);
    assert!(!forecast.points.is_empty());

    // a single month cannot be fitted; skipped, not an error
    let january: Vec<_> = records
        .iter()
        .filter(|r| r.year_month == "2024-01")
        .cloned()
        .collect();
    assert!(pipeline::forecast_for_charts(&config, &january).is_none());
}

#[test]
fn test_import_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.input.path = dir.path().join("nope.csv").to_string_lossy().into_owned();
    assert!(pipeline::import_and_clean(&config).is_err());
}

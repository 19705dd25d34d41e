use clap::{Parser, Subcommand};
use std::path::PathBuf;

use engine::pipeline;
use engine::shared::config::load_config;

#[derive(Parser)]
#[command(name = "coffee-bi", about = "Coffee chain sales analysis engine", version)]
struct Cli {
    /// Path to config.toml (falls back to the search order, then defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Full pipeline: import, clean, pivots, overview, forecast, charts
    Run,
    /// Import and clean the raw export, write cleaned_data.csv
    Import,
    /// Build the pivot tables from the cleaned dataset
    Pivots,
    /// Build the overview snapshot (overview.json)
    Overview,
    /// Fit the monthly trend and project revenue (forecast.json)
    Forecast {
        /// Months to project ahead, 1..=12
        #[arg(short, long)]
        months: Option<usize>,
    },
    /// Render the chart images from the cleaned dataset
    Charts,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("engine.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => pipeline::run_all(&config)?,
        Command::Import => {
            pipeline::import_and_clean(&config)?;
        }
        Command::Pivots => {
            let records = pipeline::load_cleaned(&config)?;
            pipeline::build_pivots(&config, &records)?;
        }
        Command::Overview => {
            let records = pipeline::load_cleaned(&config)?;
            pipeline::build_overview(&config, &records)?;
        }
        Command::Forecast { months } => {
            let records = pipeline::load_cleaned(&config)?;
            pipeline::build_forecast(&config, &records, months)?;
        }
        Command::Charts => {
            let records = pipeline::load_cleaned(&config)?;
            let forecast = pipeline::forecast_for_charts(&config, &records);
            pipeline::render_charts(&config, &records, forecast.as_ref())?;
        }
    }

    Ok(())
}
